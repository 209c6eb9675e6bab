use super::token::*;
use super::MAX_IDENT_LEN;
use std::fmt::Write;

/// An identifier as stored in a token stream: up to [`MAX_IDENT_LEN`]
/// bytes, case preserved, with the `$` suffix for strings.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Name {
    bytes: [u8; MAX_IDENT_LEN],
    len: u8,
}

impl Name {
    pub fn new(s: &[u8]) -> Name {
        let len = s.len().min(MAX_IDENT_LEN);
        let mut bytes = [0u8; MAX_IDENT_LEN];
        bytes[..len].copy_from_slice(&s[..len]);
        Name {
            bytes,
            len: len as u8,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn is_string(&self) -> bool {
        self.as_bytes().last() == Some(&b'$')
    }

    pub fn eq_ignore_case(&self, other: &[u8]) -> bool {
        self.as_bytes().eq_ignore_ascii_case(other)
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for &ch in self.as_bytes() {
            f.write_char(ch as char)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Name({})", self)
    }
}

/// One decoded token. String payloads are left in place and
/// referenced by their absolute position in the stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tok {
    Eol,
    Ident(Name),
    Number(f32),
    Integer(i32),
    Str { at: usize, len: usize },
    Keyword(Keyword),
}

/// Decodes the token at `pos`, returning it and the position of the next
/// token. Truncated or unknown input decodes as [`Tok::Eol`] and does not
/// advance.
pub fn decode(bytes: &[u8], pos: usize) -> (Tok, usize) {
    let eol = (Tok::Eol, pos);
    let code = match bytes.get(pos) {
        Some(&code) => code,
        None => return eol,
    };
    let body = pos + 1;
    match code {
        TOKEN_EOL => eol,
        TOKEN_IDENT => {
            let len = match bytes.get(body) {
                Some(&len) => len as usize,
                None => return eol,
            };
            match bytes.get(body + 1..body + 1 + len) {
                Some(name) => (Tok::Ident(Name::new(name)), body + 1 + len),
                None => eol,
            }
        }
        TOKEN_NUMBER => match read4(bytes, body) {
            Some(b) => (Tok::Number(f32::from_le_bytes(b)), body + 4),
            None => eol,
        },
        TOKEN_INTEGER => match read4(bytes, body) {
            Some(b) => (Tok::Integer(i32::from_le_bytes(b)), body + 4),
            None => eol,
        },
        TOKEN_STRING => {
            let len = match bytes.get(body..body + 2) {
                Some(b) => u16::from_le_bytes([b[0], b[1]]) as usize,
                None => return eol,
            };
            let at = body + 2;
            if at + len > bytes.len() {
                return eol;
            }
            (Tok::Str { at, len }, at + len)
        }
        _ => match Keyword::from_code(code) {
            Some(keyword) => (Tok::Keyword(keyword), body),
            None => eol,
        },
    }
}

fn read4(bytes: &[u8], at: usize) -> Option<[u8; 4]> {
    let b = bytes.get(at..at + 4)?;
    Some([b[0], b[1], b[2], b[3]])
}

/// Renders a token stream back to canonical text. Adjacent names and
/// numbers are kept apart by one space so the text tokenizes the same way.
pub fn render<W: Write>(tokens: &[u8], out: &mut W) -> std::fmt::Result {
    let mut pos = 0;
    let mut raw = false;
    let mut last = ' ';
    loop {
        let (tok, next) = decode(tokens, pos);
        let text = match tok {
            Tok::Eol => return Ok(()),
            Tok::Ident(name) => name.to_string(),
            Tok::Number(val) => val.to_string(),
            Tok::Integer(val) => val.to_string(),
            Tok::Str { at, len } => {
                let bytes = &tokens[at..at + len];
                let mut text = String::with_capacity(len + 2);
                if raw {
                    text.extend(bytes.iter().map(|&ch| ch as char));
                } else {
                    text.push('"');
                    for &ch in bytes {
                        if ch == b'"' {
                            text.push('"');
                        }
                        text.push(ch as char);
                    }
                    text.push('"');
                }
                text
            }
            Tok::Keyword(keyword) => {
                let spacing = keyword.spacing();
                raw = keyword == Keyword::Rem;
                let mut text = String::new();
                if spacing.before {
                    text.push(' ');
                }
                text.push_str(keyword.text());
                if spacing.after {
                    text.push(' ');
                }
                text
            }
        };
        if let Some(first) = text.chars().next() {
            if joins(last) && joins(first) {
                out.write_char(' ')?;
            }
            out.write_str(&text)?;
        }
        if let Some(ch) = text.chars().last() {
            last = ch;
        }
        pos = next;
    }
}

/// Characters that merge into one name or numeral when written together.
fn joins(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '.' || ch == '$'
}
