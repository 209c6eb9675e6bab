use super::program::validate_image;
use super::{Address, Arena, BufferHost, Host};
use crate::error;
use crate::lang::{decode, latin1, tokenize, Error, Tok, MAX_LINE_LEN, TOKEN_BUF_LEN};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

type Result<T> = std::result::Result<T, Error>;

/// Where the token cursor is reading from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Source {
    /// The tokenized line just entered.
    Input,
    /// Program lines, or VAL tokens on the stack.
    Arena,
}

/// A saved token cursor.
#[derive(Debug, Clone, Copy)]
pub(super) struct Cursor {
    source: Source,
    pos: usize,
    cur: Tok,
}

/// ## Interpreter
///
/// Every statement is parsed twice. A line entered with a number is
/// parsed in check mode, which validates syntax and types without side
/// effects, and then stored. A direct line is checked and then run,
/// following GOTO, GOSUB and friends through the program store until
/// control falls off the end or returns to the direct line.
pub struct Runtime<H: Host> {
    pub(super) arena: Arena,
    pub(super) host: H,
    pub(super) input: Vec<u8>,
    pub(super) source: Source,
    pub(super) pos: usize,
    pub(super) cur: Tok,
    pub(super) execute: bool,
    pub(super) line: u16,
    pub(super) stmt: u16,
    pub(super) jump: Option<Address>,
    pub(super) break_line: bool,
    pub(super) stop: Option<Address>,
    target_stmt: u16,
    pub(super) rng: StdRng,
}

impl Default for Runtime<BufferHost> {
    fn default() -> Self {
        Runtime::new(BufferHost::new(), 4096)
    }
}

impl<H: Host> Runtime<H> {
    pub fn new(host: H, memory: usize) -> Runtime<H> {
        Runtime {
            arena: Arena::new(memory),
            host,
            input: vec![0; TOKEN_BUF_LEN],
            source: Source::Input,
            pos: 0,
            cur: Tok::Eol,
            execute: false,
            line: 0,
            stmt: 0,
            jump: None,
            break_line: false,
            stop: None,
            target_stmt: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Makes RND repeatable.
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Bytes left between the stack and the variables.
    pub fn free_memory(&self) -> usize {
        self.arena.free()
    }

    /// Forgets the program, variables, frames and any STOP position.
    pub fn reset(&mut self) {
        self.arena.reset();
        self.stop = None;
        self.line = 0;
    }

    /// Installs a saved program image, replacing everything in memory.
    pub fn install_program(&mut self, image: &[u8]) -> Result<()> {
        validate_image(image)?;
        self.reset();
        self.arena.load_program(image)
    }

    /// Handles one line of user input. A line starting with a number is
    /// stored, replaced or deleted. Anything else runs immediately.
    pub fn enter(&mut self, text: &str) -> Result<()> {
        let result = self.enter_line(text);
        self.arena.clear_stack();
        if let Err(error) = &result {
            debug!("{}", error);
        }
        result
    }

    fn enter_line(&mut self, text: &str) -> Result<()> {
        let text = latin1(text);
        if text.len() > MAX_LINE_LEN {
            return Err(error!(LineTooLong));
        }
        let len = tokenize(&text, &mut self.input)?;
        self.seek(Source::Input, 0);
        let mut number = None;
        if let Tok::Integer(n) = self.cur {
            if n > u16::MAX as i32 {
                return Err(error!(LineNumberTooLarge));
            }
            if n == 0 {
                return Err(error!(BadLineNumber));
            }
            number = Some(n as u16);
            self.next_token();
        }
        let body = self.token_start();
        self.execute = false;
        self.target_stmt = 0;
        self.run_statements()
            .map_err(|e| e.in_line_number(number))?;
        match number {
            Some(number) => {
                self.arena.clear_stack();
                trace!("storing line {}", number);
                self.arena
                    .insert_line(number, &self.input[body..len])
                    .map_err(|e| e.in_line_number(Some(number)))
            }
            None => self.run(),
        }
    }

    /// Runs the direct line and wherever it leads.
    fn run(&mut self) -> Result<()> {
        self.execute = true;
        self.line = 0;
        self.target_stmt = 0;
        self.seek(Source::Input, 0);
        loop {
            self.stmt = 0;
            let line = Some(self.line);
            if self.target_stmt != 0 {
                self.skip_to_target().map_err(|e| e.in_line_number(line))?;
            }
            self.run_statements().map_err(|e| e.in_line_number(line))?;
            let jump = self.jump;
            if self.line == 0 && jump.is_none() {
                return Ok(());
            }
            match jump {
                Some(Address { line: 0, stmt }) => {
                    self.line = 0;
                    self.seek(Source::Input, 0);
                    self.target_stmt = stmt;
                }
                _ => {
                    let offset = match jump {
                        Some(to) => self.arena.find_line(to.line),
                        None => match self.line.checked_add(1) {
                            Some(next) => self.arena.find_line(next),
                            None => return Ok(()),
                        },
                    };
                    let (number, tokens) = match self.arena.line_at(offset) {
                        Some(line) => line,
                        None => return Ok(()),
                    };
                    self.line = number;
                    self.seek(Source::Arena, tokens.start);
                    self.target_stmt = match jump {
                        Some(to) if to.line == number => to.stmt,
                        _ => 0,
                    };
                }
            }
            if self.host.poll_break() {
                return Err(error!(BreakPressed, Some(self.line)));
            }
            trace!("line {} statement {}", self.line, self.target_stmt);
        }
    }

    /// Parses statements without running them until `target_stmt`.
    fn skip_to_target(&mut self) -> Result<()> {
        self.execute = false;
        let result = self.run_statements();
        self.execute = true;
        self.target_stmt = 0;
        result
    }

    /// Runs statements until the end of the line, a jump or a break.
    fn run_statements(&mut self) -> Result<()> {
        use crate::lang::Keyword::Colon;
        self.break_line = false;
        self.jump = None;
        loop {
            if self.cur == Tok::Eol {
                return Ok(());
            }
            if self.execute {
                self.arena.clear_stack();
            }
            let need_separator = self.statement()?;
            if self.break_line || self.jump.is_some() {
                return Ok(());
            }
            if need_separator && self.cur != Tok::Eol {
                if self.cur != Tok::Keyword(Colon) {
                    return Err(error!(UnexpectedCommand));
                }
                self.next_token();
                if self.cur == Tok::Eol {
                    return Err(error!(UnexpectedCommand));
                }
            }
            self.stmt += 1;
            if self.stmt == self.target_stmt {
                return Ok(());
            }
        }
    }

    fn tokens(&self) -> &[u8] {
        match self.source {
            Source::Input => &self.input,
            Source::Arena => &self.arena.mem,
        }
    }

    /// Advances to the next token. Never moves past the end of a line.
    pub(super) fn next_token(&mut self) -> Tok {
        let (tok, next) = decode(self.tokens(), self.pos);
        self.cur = tok;
        self.pos = next;
        tok
    }

    fn token_start(&self) -> usize {
        self.pos - self.token_len()
    }

    fn token_len(&self) -> usize {
        match self.cur {
            Tok::Eol => 0,
            Tok::Ident(name) => 2 + name.as_bytes().len(),
            Tok::Number(_) | Tok::Integer(_) => 5,
            Tok::Str { len, .. } => 3 + len,
            Tok::Keyword(_) => 1,
        }
    }

    pub(super) fn seek(&mut self, source: Source, pos: usize) {
        self.source = source;
        self.pos = pos;
        self.next_token();
    }

    pub(super) fn cursor(&self) -> Cursor {
        Cursor {
            source: self.source,
            pos: self.pos,
            cur: self.cur,
        }
    }

    pub(super) fn restore(&mut self, cursor: Cursor) {
        self.source = cursor.source;
        self.pos = cursor.pos;
        self.cur = cursor.cur;
    }

    /// Pushes a string literal from the token stream.
    pub(super) fn push_literal(&mut self, at: usize, len: usize) -> Result<()> {
        match self.source {
            Source::Input => self.arena.push_str(&self.input[at..at + len]),
            Source::Arena => self.arena.push_str_within(at..at + len),
        }
    }
}
