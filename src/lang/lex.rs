use super::token::*;
use super::{Error, MAX_IDENT_LEN, MAX_NUMBER_LEN};

type Result<T> = std::result::Result<T, Error>;

/// Text as BASIC bytes: one Latin-1 byte per character. NUL is dropped
/// and characters beyond Latin-1 become `?`.
pub fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|&ch| ch != '\0')
        .map(|ch| if (ch as u32) < 256 { ch as u8 } else { b'?' })
        .collect()
}

/// Tokenizes one line of text into `out`, returning the number of bytes
/// written. The stream always ends with [`TOKEN_EOL`]. A NUL byte in the
/// input ends the line.
pub fn tokenize(text: &[u8], out: &mut [u8]) -> Result<usize> {
    let end = text.iter().position(|&ch| ch == 0).unwrap_or(text.len());
    let mut lexer = Lexer {
        input: &text[..end],
        pos: 0,
        out: Writer { out, len: 0 },
    };
    lexer.lex()?;
    Ok(lexer.out.len)
}

/// Bounded output cursor. Running out of room is `LineTooLong`.
struct Writer<'a> {
    out: &'a mut [u8],
    len: usize,
}

impl<'a> Writer<'a> {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.len + bytes.len();
        if end > self.out.len() {
            return Err(error!(LineTooLong));
        }
        self.out[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }

    fn put_byte(&mut self, byte: u8) -> Result<()> {
        self.put(&[byte])
    }

    fn patch_u16(&mut self, at: usize, val: u16) {
        self.out[at..at + 2].copy_from_slice(&val.to_le_bytes());
    }
}

struct Lexer<'a, 'b> {
    input: &'a [u8],
    pos: usize,
    out: Writer<'b>,
}

impl<'a, 'b> Lexer<'a, 'b> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn lex(&mut self) -> Result<()> {
        loop {
            while matches!(self.peek(), Some(ch) if ch.is_ascii_whitespace()) {
                self.pos += 1;
            }
            match self.peek() {
                None => return self.out.put_byte(TOKEN_EOL),
                Some(ch) if ch.is_ascii_digit() || ch == b'.' => self.number()?,
                Some(ch) if ch.is_ascii_alphabetic() => {
                    if self.alphabetic()? {
                        // REM took the rest of the line
                        return self.out.put_byte(TOKEN_EOL);
                    }
                }
                Some(b'"') => self.string()?,
                Some(_) => self.symbol()?,
            }
        }
    }

    fn number(&mut self) -> Result<()> {
        let start = self.pos;
        let mut decimal = false;
        while let Some(ch) = self.peek() {
            if ch == b'.' {
                if decimal {
                    return Err(error!(MalformedNumber));
                }
                decimal = true;
            } else if !ch.is_ascii_digit() {
                break;
            }
            if self.pos - start == MAX_NUMBER_LEN {
                return Err(error!(MalformedNumber));
            }
            self.pos += 1;
        }
        let numeral = &self.input[start..self.pos];
        if numeral == b"." {
            return Err(error!(MalformedNumber));
        }
        // ASCII digits and at most one point
        let s = std::str::from_utf8(numeral).map_err(|_| error!(MalformedNumber))?;
        if !decimal {
            if let Ok(int) = s.parse::<i32>() {
                self.out.put_byte(TOKEN_INTEGER)?;
                return self.out.put(&int.to_le_bytes());
            }
        }
        match s.parse::<f32>() {
            Ok(float) if float.is_finite() => {
                self.out.put_byte(TOKEN_NUMBER)?;
                self.out.put(&float.to_le_bytes())
            }
            _ => Err(error!(MalformedNumber)),
        }
    }

    /// Returns true when the word was REM.
    fn alphabetic(&mut self) -> Result<bool> {
        let start = self.pos;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_alphanumeric() || ch == b'$') {
            self.pos += 1;
        }
        let word = &self.input[start..self.pos];
        if let Some(keyword) = Keyword::from_word(word) {
            self.out.put_byte(keyword.code())?;
            if keyword == Keyword::Rem {
                while matches!(self.peek(), Some(ch) if ch.is_ascii_whitespace()) {
                    self.pos += 1;
                }
                let rest = &self.input[self.pos..];
                self.pos = self.input.len();
                self.put_string(rest)?;
                return Ok(true);
            }
            return Ok(false);
        }
        let is_string = match word.iter().position(|&ch| ch == b'$') {
            None => false,
            Some(index) if index == word.len() - 1 => true,
            Some(_) => return Err(error!(UnexpectedCharacter)),
        };
        let mut name = [0u8; MAX_IDENT_LEN];
        let len = word.len().min(MAX_IDENT_LEN);
        name[..len].copy_from_slice(&word[..len]);
        if is_string {
            name[len - 1] = b'$';
        }
        self.out.put_byte(TOKEN_IDENT)?;
        self.out.put_byte(len as u8)?;
        self.out.put(&name[..len])?;
        Ok(false)
    }

    fn string(&mut self) -> Result<()> {
        self.pos += 1;
        self.out.put_byte(TOKEN_STRING)?;
        let len_at = self.out.len;
        self.out.put(&[0, 0])?;
        let mut len = 0u16;
        loop {
            match self.peek() {
                None => return Err(error!(UnterminatedString)),
                Some(b'"') => {
                    self.pos += 1;
                    if self.peek() != Some(b'"') {
                        break;
                    }
                }
                Some(_) => {}
            }
            // an escaped quote lands here pointing at its second half
            let ch = self.input[self.pos];
            self.pos += 1;
            self.out.put_byte(ch)?;
            len += 1;
        }
        self.out.patch_u16(len_at, len);
        Ok(())
    }

    fn put_string(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > u16::MAX as usize {
            return Err(error!(LineTooLong));
        }
        self.out.put_byte(TOKEN_STRING)?;
        self.out.put(&(bytes.len() as u16).to_le_bytes())?;
        self.out.put(bytes)
    }

    fn symbol(&mut self) -> Result<()> {
        match Keyword::match_symbol(&self.input[self.pos..]) {
            Some(keyword) => {
                self.pos += keyword.text().len();
                self.out.put_byte(keyword.code())
            }
            None => Err(error!(UnexpectedCharacter)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(s: &str) -> Result<Vec<u8>> {
        let mut buf = [0u8; 64];
        let len = tokenize(s.as_bytes(), &mut buf)?;
        Ok(buf[..len].to_vec())
    }

    #[test]
    fn test_latin1() {
        assert_eq!(latin1("A\u{e9}"), vec![b'A', 0xE9]);
        assert_eq!(latin1("x\0\u{3c0}"), b"x?".to_vec());
    }

    #[test]
    fn test_integer_and_float() {
        assert_eq!(lex("12").unwrap(), vec![TOKEN_INTEGER, 12, 0, 0, 0, TOKEN_EOL]);
        let mut expect = vec![TOKEN_NUMBER];
        expect.extend_from_slice(&1.5f32.to_le_bytes());
        expect.push(TOKEN_EOL);
        assert_eq!(lex("1.5").unwrap(), expect);
    }

    #[test]
    fn test_large_integer_becomes_float() {
        let t = lex("3000000000").unwrap();
        assert_eq!(t[0], TOKEN_NUMBER);
    }

    #[test]
    fn test_bad_numbers() {
        assert_eq!(lex("1.2.3").unwrap_err().code(), crate::lang::ErrorCode::MalformedNumber);
        assert_eq!(lex(".").unwrap_err().code(), crate::lang::ErrorCode::MalformedNumber);
    }

    #[test]
    fn test_identifier() {
        assert_eq!(lex("ab$").unwrap(), vec![TOKEN_IDENT, 3, b'a', b'b', b'$', TOKEN_EOL]);
        assert_eq!(
            lex("a$b").unwrap_err().code(),
            crate::lang::ErrorCode::UnexpectedCharacter
        );
    }

    #[test]
    fn test_long_string_identifier_keeps_dollar() {
        let t = lex("abcdefghijklmnopqrstuvwxyz$").unwrap();
        assert_eq!(t[1] as usize, MAX_IDENT_LEN);
        assert_eq!(t[1 + MAX_IDENT_LEN], b'$');
    }

    #[test]
    fn test_keywords_are_whole_words() {
        assert_eq!(lex("print").unwrap(), vec![Keyword::Print.code(), TOKEN_EOL]);
        assert_eq!(lex("printx").unwrap()[0], TOKEN_IDENT);
    }

    #[test]
    fn test_string_escape() {
        assert_eq!(
            lex(r#""a""b""#).unwrap(),
            vec![TOKEN_STRING, 3, 0, b'a', b'"', b'b', TOKEN_EOL]
        );
        assert_eq!(
            lex(r#""abc"#).unwrap_err().code(),
            crate::lang::ErrorCode::UnterminatedString
        );
    }

    #[test]
    fn test_rem_is_raw() {
        assert_eq!(
            lex("REM  hi \"there").unwrap(),
            vec![
                Keyword::Rem.code(),
                TOKEN_STRING,
                9,
                0,
                b'h',
                b'i',
                b' ',
                b'"',
                b't',
                b'h',
                b'e',
                b'r',
                b'e',
                TOKEN_EOL
            ]
        );
    }

    #[test]
    fn test_output_is_bounded() {
        let mut buf = [0u8; 4];
        let err = tokenize(b"PRINT 12345", &mut buf).unwrap_err();
        assert_eq!(err.code(), crate::lang::ErrorCode::LineTooLong);
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            lex("PRINT #").unwrap_err().code(),
            crate::lang::ErrorCode::UnexpectedCharacter
        );
    }
}
