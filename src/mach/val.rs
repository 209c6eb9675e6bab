/// Type of a value an expression left on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValType {
    Number,
    String,
}

impl ValType {
    pub fn of_name(is_string: bool) -> ValType {
        if is_string {
            ValType::String
        } else {
            ValType::Number
        }
    }
}
