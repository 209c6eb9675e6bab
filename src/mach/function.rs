use super::ValType;
use crate::lang::Keyword;

/// Argument and result types of a built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSpec {
    pub args: &'static [ValType],
    pub returns: ValType,
}

const NUM: ValType = ValType::Number;
const STR: ValType = ValType::String;

pub struct Function {}

impl Function {
    pub fn spec(keyword: Keyword) -> Option<FunctionSpec> {
        use Keyword::*;
        let (args, returns): (&'static [ValType], ValType) = match keyword {
            Len => (&[STR], NUM),
            Val => (&[STR], NUM),
            Int => (&[NUM], NUM),
            Str => (&[NUM], STR),
            Left => (&[STR, NUM], STR),
            Right => (&[STR, NUM], STR),
            Mid => (&[STR, NUM, NUM], STR),
            PinRead => (&[NUM], NUM),
            AnalogRead => (&[NUM], NUM),
            _ => return None,
        };
        Some(FunctionSpec { args, returns })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specs() {
        let mid = Function::spec(Keyword::Mid).unwrap();
        assert_eq!(mid.args.len(), 3);
        assert_eq!(mid.returns, ValType::String);
        assert_eq!(Function::spec(Keyword::Rnd), None);
        assert_eq!(Function::spec(Keyword::Print), None);
    }
}
