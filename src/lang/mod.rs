/*!
# Rust Language Module

This Rust module provides lexical analysis of BASIC: turning a line of
text into the compact token stream that is stored and executed, and
rendering that stream back to text.

*/

pub type LineNumber = Option<u16>;

/// Longest line of text accepted from the user.
pub const MAX_LINE_LEN: usize = 255;
/// Size of the buffer a direct-mode line is tokenized into.
pub const TOKEN_BUF_LEN: usize = 256;
/// Identifiers longer than this are truncated.
pub const MAX_IDENT_LEN: usize = 16;
/// Longest numeral the lexer will read.
pub const MAX_NUMBER_LEN: usize = 64;
/// Number of numbered program slots for SAVE and LOAD.
pub const SAVE_SLOTS: u16 = 6;

#[macro_use]
mod error;
mod lex;
mod line;
mod number;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::{latin1, tokenize};
pub use line::{decode, render, Name, Tok};
pub use number::{format_number, parse_leading_float};
pub use token::{Keyword, Spacing};
pub use token::{FIRST_KEYWORD, TOKEN_EOL, TOKEN_IDENT, TOKEN_INTEGER, TOKEN_NUMBER, TOKEN_STRING};
