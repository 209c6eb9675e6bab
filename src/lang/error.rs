use super::LineNumber;

#[derive(Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn is_direct(&self) -> bool {
        self.line_number.is_none()
    }

    /// Attaches a line number unless one is already present.
    /// Line 0 is the direct-mode buffer and is never attached.
    pub fn in_line_number(self, line: LineNumber) -> Error {
        if self.line_number.is_some() || line == Some(0) {
            return self;
        }
        Error {
            line_number: line,
            ..self
        }
    }

    pub fn message(self, message: &str) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.to_string(),
            ..self
        }
    }
}

/// Every failure the engine reports. Numbering is stable so that
/// hosts can map codes to their own messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorCode {
    #[error("BAD NUMBER")]
    MalformedNumber = 1,
    #[error("LINE TOO LONG")]
    LineTooLong = 2,
    #[error("UNEXPECTED INPUT")]
    UnexpectedCharacter = 3,
    #[error("UNTERMINATED STRING")]
    UnterminatedString = 4,
    #[error("MISSING BRACKET")]
    MissingBracket = 5,
    #[error("ERROR IN EXPR")]
    UnexpectedToken = 6,
    #[error("NUMERIC EXPR EXPECTED")]
    ExpectedNumber = 7,
    #[error("STRING EXPR EXPECTED")]
    ExpectedString = 8,
    #[error("LINE NUMBER TOO BIG")]
    LineNumberTooLarge = 9,
    #[error("OUT OF MEMORY")]
    OutOfMemory = 10,
    #[error("DIV BY ZERO")]
    DivideByZero = 11,
    #[error("VARIABLE NOT FOUND")]
    VariableNotFound = 12,
    #[error("BAD COMMAND")]
    UnexpectedCommand = 13,
    #[error("BAD LINE NUMBER")]
    BadLineNumber = 14,
    #[error("BREAK PRESSED")]
    BreakPressed = 15,
    #[error("NEXT WITHOUT FOR")]
    NextWithoutFor = 16,
    #[error("STOP STATEMENT")]
    StopStatement = 17,
    #[error("MISSING THEN IN IF")]
    MissingThen = 18,
    #[error("RETURN WITHOUT GOSUB")]
    ReturnWithoutGosub = 19,
    #[error("WRONG ARRAY DIMS")]
    WrongArrayDimensions = 20,
    #[error("BAD ARRAY INDEX")]
    ArraySubscriptOutOfRange = 21,
    #[error("BAD STRING INDEX")]
    StringSubscriptOutOfRange = 22,
    #[error("ERROR IN VAL INPUT")]
    ErrorInValInput = 23,
    #[error("BAD PARAMETER")]
    BadParameter = 24,
    #[error("STORAGE ERROR")]
    StorageError = 50,
    #[error("INTERNAL ERROR")]
    InternalError = 51,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(line_number) = self.line_number {
            write!(f, " IN {}", line_number)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.code)
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_display() {
        assert_eq!(error!(OutOfMemory).to_string(), "OUT OF MEMORY");
        assert_eq!(
            error!(DivideByZero, Some(20)).to_string(),
            "DIV BY ZERO IN 20"
        );
        assert_eq!(
            error!(BadParameter, Some(5); "NO SUCH PROGRAM").to_string(),
            "BAD PARAMETER IN 5; NO SUCH PROGRAM"
        );
    }

    #[test]
    fn test_line_number_is_attached_once() {
        let e = error!(StopStatement).in_line_number(Some(0));
        assert!(e.is_direct());
        let e = e.in_line_number(Some(30)).in_line_number(Some(40));
        assert_eq!(e.line_number(), Some(30));
    }
}
