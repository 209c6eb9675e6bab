use super::{Function, Host, Operation, Runtime, ValType};
use crate::error;
use crate::lang::{format_number, Error, ErrorCode, Keyword, Name, Tok};
use rand::Rng;

type Result<T> = std::result::Result<T, Error>;

/// ## Expression evaluator
///
/// Operator precedence parsing straight off the token stream. In execute
/// mode every operand is pushed on the arena stack and every operator
/// pops its inputs and pushes its result. In check mode only the types
/// are tracked.

impl<H: Host> Runtime<H> {
    pub(super) fn expression(&mut self) -> Result<ValType> {
        let lhs = self.primary()?;
        self.binary_rhs(0, lhs)
    }

    /// Parses and evaluates a numeric expression.
    pub(super) fn expect_number(&mut self) -> Result<()> {
        match self.expression()? {
            ValType::Number => Ok(()),
            ValType::String => Err(error!(ExpectedNumber)),
        }
    }

    fn binary_precedence(&self) -> Option<(Keyword, u8)> {
        match self.cur {
            Tok::Keyword(k) => Operation::precedence(k).map(|p| (k, p)),
            _ => None,
        }
    }

    fn binary_rhs(&mut self, min_precedence: u8, mut lhs: ValType) -> Result<ValType> {
        loop {
            let (op, precedence) = match self.binary_precedence() {
                Some((op, p)) if p >= min_precedence => (op, p),
                _ => return Ok(lhs),
            };
            self.next_token();
            let mut rhs = self.primary()?;
            if let Some((_, next)) = self.binary_precedence() {
                if precedence < next {
                    rhs = self.binary_rhs(precedence + 1, rhs)?;
                }
            }
            lhs = self.binary(op, lhs, rhs)?;
        }
    }

    fn binary(&mut self, op: Keyword, lhs: ValType, rhs: ValType) -> Result<ValType> {
        match (lhs, rhs) {
            (ValType::Number, ValType::Number) => {
                if self.execute {
                    let r = self.arena.pop_float()?;
                    let l = self.arena.pop_float()?;
                    self.arena.push_float(Operation::numeric(op, l, r)?)?;
                }
                Ok(ValType::Number)
            }
            (ValType::String, ValType::String) => {
                if op == Keyword::Plus {
                    if self.execute {
                        self.arena.concat_strs()?;
                    }
                    Ok(ValType::String)
                } else if Operation::is_comparison(op) {
                    if self.execute {
                        let r = self.arena.pop_str()?;
                        let l = self.arena.pop_str()?;
                        let val = Operation::compare(
                            op,
                            self.arena.str_bytes(l),
                            self.arena.str_bytes(r),
                        )?;
                        self.arena.push_float(val)?;
                    }
                    Ok(ValType::Number)
                } else {
                    Err(error!(UnexpectedToken))
                }
            }
            (ValType::Number, ValType::String) => Err(error!(ExpectedNumber)),
            (ValType::String, ValType::Number) => Err(error!(ExpectedString)),
        }
    }

    fn primary(&mut self) -> Result<ValType> {
        match self.cur {
            Tok::Ident(name) => self.variable(name),
            Tok::Number(val) => self.literal(val),
            Tok::Integer(val) => self.literal(val as f32),
            Tok::Str { at, len } => {
                if self.execute {
                    self.push_literal(at, len)?;
                }
                self.next_token();
                Ok(ValType::String)
            }
            Tok::Keyword(Keyword::LParen) => {
                self.next_token();
                let val_type = self.expression()?;
                if self.cur != Tok::Keyword(Keyword::RParen) {
                    return Err(error!(MissingBracket));
                }
                self.next_token();
                Ok(val_type)
            }
            Tok::Keyword(op @ Keyword::Minus) | Tok::Keyword(op @ Keyword::Not) => {
                self.next_token();
                if self.primary()? != ValType::Number {
                    return Err(error!(ExpectedNumber));
                }
                if self.execute {
                    let val = self.arena.pop_float()?;
                    self.arena.push_float(match op {
                        Keyword::Minus => Operation::negate(val),
                        _ => Operation::not(val),
                    })?;
                }
                Ok(ValType::Number)
            }
            Tok::Keyword(Keyword::Rnd) => {
                self.next_token();
                if self.execute {
                    let val: f32 = self.rng.gen();
                    self.arena.push_float(val)?;
                }
                Ok(ValType::Number)
            }
            Tok::Keyword(Keyword::Inkey) => {
                self.next_token();
                if self.execute {
                    let key = match self.host.poll_key() {
                        Some(ch) if ch != '\0' && (ch as u32) < 256 => vec![ch as u8],
                        _ => vec![],
                    };
                    self.arena.push_str(&key)?;
                }
                Ok(ValType::String)
            }
            Tok::Keyword(keyword) if Function::spec(keyword).is_some() => self.function(keyword),
            _ => Err(error!(UnexpectedToken)),
        }
    }

    fn literal(&mut self, val: f32) -> Result<ValType> {
        if self.execute {
            self.arena.push_float(val)?;
        }
        self.next_token();
        Ok(ValType::Number)
    }

    /// A variable reference, subscripted when followed by `(`.
    fn variable(&mut self, name: Name) -> Result<ValType> {
        self.next_token();
        let is_string = name.is_string();
        if self.cur == Tok::Keyword(Keyword::LParen) {
            self.subscripts()?;
            if self.execute {
                if is_string {
                    let s = self.arena.lookup_str_element(&name)?;
                    self.arena.push_str_within(s)?;
                } else {
                    let val = self.arena.lookup_num_element(&name)?;
                    self.arena.push_float(val)?;
                }
            }
        } else if self.execute {
            if is_string {
                let s = self.arena.lookup_string(&name)?;
                self.arena.push_str_within(s)?;
            } else {
                let val = self.arena.lookup_scalar(&name)?;
                self.arena.push_float(val)?;
            }
        }
        Ok(ValType::of_name(is_string))
    }

    /// Parses `(x1, .., xn)`. In execute mode the subscripts and then
    /// their count are left on the stack.
    pub(super) fn subscripts(&mut self) -> Result<()> {
        if self.cur != Tok::Keyword(Keyword::LParen) {
            return Err(error!(MissingBracket));
        }
        self.next_token();
        let mut count = 0;
        loop {
            count += 1;
            self.expect_number()?;
            match self.cur {
                Tok::Keyword(Keyword::RParen) => break,
                Tok::Keyword(Keyword::Comma) => {
                    self.next_token();
                }
                _ => return Err(error!(MissingBracket)),
            }
        }
        self.next_token();
        if self.execute {
            self.arena.push_float(count as f32)?;
        }
        Ok(())
    }

    fn function(&mut self, keyword: Keyword) -> Result<ValType> {
        let spec = match Function::spec(keyword) {
            Some(spec) => spec,
            None => return Err(error!(UnexpectedToken)),
        };
        self.next_token();
        if self.cur != Tok::Keyword(Keyword::LParen) {
            return Err(error!(MissingBracket));
        }
        self.next_token();
        for (index, &arg) in spec.args.iter().enumerate() {
            if self.expression()? != arg {
                return Err(match arg {
                    ValType::Number => error!(ExpectedNumber),
                    ValType::String => error!(ExpectedString),
                });
            }
            if index + 1 < spec.args.len() {
                if self.cur != Tok::Keyword(Keyword::Comma) {
                    return Err(error!(UnexpectedToken));
                }
                self.next_token();
            }
        }
        if self.execute {
            self.call(keyword)?;
        }
        if self.cur != Tok::Keyword(Keyword::RParen) {
            return Err(error!(MissingBracket));
        }
        self.next_token();
        Ok(spec.returns)
    }

    /// Replaces the arguments on the stack with the function's result.
    fn call(&mut self, keyword: Keyword) -> Result<()> {
        match keyword {
            Keyword::Len => {
                let s = self.arena.pop_str()?;
                self.arena.push_float(s.len() as f32)
            }
            Keyword::Val => self.val(),
            Keyword::Int => {
                let val = self.arena.pop_float()?;
                self.arena.push_float(val.floor())
            }
            Keyword::Str => {
                let val = self.arena.pop_float()?;
                self.arena.push_str(format_number(val).as_bytes())
            }
            Keyword::Left | Keyword::Right => {
                let len = self.arena.pop_float()? as i32;
                if len < 0 {
                    return Err(error!(StringSubscriptOutOfRange));
                }
                self.arena
                    .truncate_str(len as usize, keyword == Keyword::Right)
            }
            Keyword::Mid => {
                let len = self.arena.pop_float()? as i32;
                let start = self.arena.pop_float()? as i32;
                if len < 0 || start < 1 {
                    return Err(error!(StringSubscriptOutOfRange));
                }
                self.arena.mid_str(start as usize, len as usize)
            }
            Keyword::PinRead => {
                let pin = self.arena.pop_float()? as i32;
                let val = self.host.digital_read(pin);
                self.arena.push_float(val as f32)
            }
            Keyword::AnalogRead => {
                let pin = self.arena.pop_float()? as i32;
                let val = self.host.analog_read(pin);
                self.arena.push_float(val as f32)
            }
            _ => Err(error!(UnexpectedToken)),
        }
    }

    /// Tokenizes the string on top of the stack and evaluates it as a
    /// numeric expression that must use up the whole string.
    fn val(&mut self) -> Result<()> {
        let saved = self.cursor();
        let stack_end = self.arena.stack_end;
        let tokens = self.arena.tokenize_on_stack().map_err(val_error)?;
        self.seek(super::runtime::Source::Arena, tokens.start);
        let val_type = self.expression().map_err(val_error)?;
        if self.cur != Tok::Eol {
            return Err(error!(ErrorInValInput));
        }
        if val_type != ValType::Number {
            return Err(error!(ExpectedNumber));
        }
        let val = self.arena.pop_float()?;
        self.arena.stack_end = stack_end;
        self.arena.pop_str()?;
        self.arena.push_float(val)?;
        self.restore(saved);
        Ok(())
    }
}

fn val_error(error: Error) -> Error {
    match error.code() {
        ErrorCode::OutOfMemory => error,
        _ => error!(ErrorInValInput),
    }
}
