use crate::error;
use crate::lang::{Error, Keyword};
use std::cmp::Ordering;

type Result<T> = std::result::Result<T, Error>;

pub struct Operation {}

fn truth(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

impl Operation {
    /// Binding power of a binary operator. Higher binds tighter.
    pub fn precedence(keyword: Keyword) -> Option<u8> {
        use Keyword::*;
        match keyword {
            And | Or => Some(5),
            Equal | NotEqual => Some(10),
            Less | Greater | LessEqual | GreaterEqual => Some(20),
            Plus | Minus => Some(30),
            Multiply | Divide | Mod => Some(40),
            _ => None,
        }
    }

    pub fn negate(val: f32) -> f32 {
        -val
    }

    pub fn not(val: f32) -> f32 {
        truth(val == 0.0)
    }

    /// Applies a binary operator to two numbers. AND and OR see values
    /// that were both already evaluated.
    pub fn numeric(op: Keyword, l: f32, r: f32) -> Result<f32> {
        use Keyword::*;
        Ok(match op {
            Plus => l + r,
            Minus => l - r,
            Multiply => l * r,
            Divide => {
                if r == 0.0 {
                    return Err(error!(DivideByZero));
                }
                l / r
            }
            Mod => {
                let r = r as i32;
                if r == 0 {
                    return Err(error!(DivideByZero));
                }
                (l as i32).wrapping_rem(r) as f32
            }
            Less => truth(l < r),
            Greater => truth(l > r),
            Equal => truth(l == r),
            NotEqual => truth(l != r),
            LessEqual => truth(l <= r),
            GreaterEqual => truth(l >= r),
            And => {
                if r != 0.0 {
                    l
                } else {
                    0.0
                }
            }
            Or => {
                if r != 0.0 {
                    1.0
                } else {
                    l
                }
            }
            _ => return Err(error!(UnexpectedToken)),
        })
    }

    pub fn is_comparison(op: Keyword) -> bool {
        use Keyword::*;
        matches!(
            op,
            Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual
        )
    }

    /// Compares two strings byte by byte.
    pub fn compare(op: Keyword, l: &[u8], r: &[u8]) -> Result<f32> {
        use Keyword::*;
        let ord = l.cmp(r);
        Ok(truth(match op {
            Equal => ord == Ordering::Equal,
            NotEqual => ord != Ordering::Equal,
            Less => ord == Ordering::Less,
            Greater => ord == Ordering::Greater,
            LessEqual => ord != Ordering::Greater,
            GreaterEqual => ord != Ordering::Less,
            _ => return Err(error!(UnexpectedToken)),
        }))
    }
}
