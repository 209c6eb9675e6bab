//! Token codes and the keyword table.
//!
//! A tokenized line is a byte stream. Codes below [`FIRST_KEYWORD`] introduce
//! a literal or identifier with an inline payload, everything from
//! [`FIRST_KEYWORD`] up is a single-byte keyword or operator.

pub const TOKEN_EOL: u8 = 0;
pub const TOKEN_IDENT: u8 = 1;
pub const TOKEN_NUMBER: u8 = 2;
pub const TOKEN_INTEGER: u8 = 3;
pub const TOKEN_STRING: u8 = 4;
pub const FIRST_KEYWORD: u8 = 8;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    LParen = FIRST_KEYWORD,
    RParen,
    Plus,
    Minus,
    Multiply,
    Divide,
    Equal,
    Greater,
    Less,
    NotEqual,
    GreaterEqual,
    LessEqual,
    Colon,
    Semicolon,
    Comma,
    And,
    Or,
    Not,
    Print,
    Let,
    List,
    Run,
    Goto,
    Rem,
    Stop,
    Input,
    Cont,
    If,
    Then,
    Len,
    Val,
    Rnd,
    Int,
    Str,
    For,
    To,
    Step,
    Next,
    Mod,
    New,
    Gosub,
    Return,
    Dim,
    Left,
    Right,
    Mid,
    Cls,
    Pause,
    Position,
    Pin,
    PinMode,
    Inkey,
    Save,
    Load,
    PinRead,
    AnalogRead,
    Dir,
    Delete,
}

/// Whether a keyword is rendered with a space before and/or after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacing {
    pub before: bool,
    pub after: bool,
}

const NONE: Spacing = Spacing {
    before: false,
    after: false,
};
const POST: Spacing = Spacing {
    before: false,
    after: true,
};
const BOTH: Spacing = Spacing {
    before: true,
    after: true,
};

struct Entry {
    keyword: Keyword,
    text: &'static str,
    spacing: Spacing,
}

const fn entry(keyword: Keyword, text: &'static str, spacing: Spacing) -> Entry {
    Entry {
        keyword,
        text,
        spacing,
    }
}

// Indexed by code - FIRST_KEYWORD.
static KEYWORDS: [Entry; 58] = {
    use Keyword::*;
    [
        entry(LParen, "(", NONE),
        entry(RParen, ")", NONE),
        entry(Plus, "+", NONE),
        entry(Minus, "-", NONE),
        entry(Multiply, "*", NONE),
        entry(Divide, "/", NONE),
        entry(Equal, "=", NONE),
        entry(Greater, ">", NONE),
        entry(Less, "<", NONE),
        entry(NotEqual, "<>", NONE),
        entry(GreaterEqual, ">=", NONE),
        entry(LessEqual, "<=", NONE),
        entry(Colon, ":", POST),
        entry(Semicolon, ";", NONE),
        entry(Comma, ",", NONE),
        entry(And, "AND", BOTH),
        entry(Or, "OR", BOTH),
        entry(Not, "NOT", POST),
        entry(Print, "PRINT", POST),
        entry(Let, "LET", POST),
        entry(List, "LIST", POST),
        entry(Run, "RUN", POST),
        entry(Goto, "GOTO", POST),
        entry(Rem, "REM", POST),
        entry(Stop, "STOP", POST),
        entry(Input, "INPUT", POST),
        entry(Cont, "CONT", POST),
        entry(If, "IF", POST),
        entry(Then, "THEN", BOTH),
        entry(Len, "LEN", NONE),
        entry(Val, "VAL", NONE),
        entry(Rnd, "RND", NONE),
        entry(Int, "INT", NONE),
        entry(Str, "STR$", NONE),
        entry(For, "FOR", POST),
        entry(To, "TO", BOTH),
        entry(Step, "STEP", BOTH),
        entry(Next, "NEXT", POST),
        entry(Mod, "MOD", BOTH),
        entry(New, "NEW", POST),
        entry(Gosub, "GOSUB", POST),
        entry(Return, "RETURN", POST),
        entry(Dim, "DIM", POST),
        entry(Left, "LEFT$", NONE),
        entry(Right, "RIGHT$", NONE),
        entry(Mid, "MID$", NONE),
        entry(Cls, "CLS", POST),
        entry(Pause, "PAUSE", POST),
        entry(Position, "POSITION", POST),
        entry(Pin, "PIN", POST),
        entry(PinMode, "PINMODE", POST),
        entry(Inkey, "INKEY$", NONE),
        entry(Save, "SAVE", POST),
        entry(Load, "LOAD", POST),
        entry(PinRead, "PINREAD", NONE),
        entry(AnalogRead, "ANALOGRD", NONE),
        entry(Dir, "DIR", POST),
        entry(Delete, "DELETE", POST),
    ]
};

// The symbolic operators occupy the codes up to and including the comma.
const LAST_SYMBOL: Keyword = Keyword::Comma;

impl Keyword {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Keyword> {
        code.checked_sub(FIRST_KEYWORD)
            .and_then(|index| KEYWORDS.get(index as usize))
            .map(|e| e.keyword)
    }

    fn entry(self) -> &'static Entry {
        &KEYWORDS[(self.code() - FIRST_KEYWORD) as usize]
    }

    pub fn text(self) -> &'static str {
        self.entry().text
    }

    pub fn spacing(self) -> Spacing {
        self.entry().spacing
    }

    /// Looks up a whole word, case-insensitive.
    pub fn from_word(word: &[u8]) -> Option<Keyword> {
        KEYWORDS[(LAST_SYMBOL.code() - FIRST_KEYWORD + 1) as usize..]
            .iter()
            .find(|e| e.text.as_bytes().eq_ignore_ascii_case(word))
            .map(|e| e.keyword)
    }

    /// Matches the operator at the start of `input`. Higher codes are tried
    /// first so two-character operators win over their prefixes.
    pub fn match_symbol(input: &[u8]) -> Option<Keyword> {
        KEYWORDS[..=(LAST_SYMBOL.code() - FIRST_KEYWORD) as usize]
            .iter()
            .rev()
            .find(|e| input.starts_with(e.text.as_bytes()))
            .map(|e| e.keyword)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.text())
    }
}
