use super::Arena;
use crate::error;
use crate::lang::{tokenize, Error, ErrorCode};
use std::ops::Range;

type Result<T> = std::result::Result<T, Error>;

/// ## Expression stack
///
/// Sits directly above the program and is empty between statements.
/// Numbers take four bytes. Strings are their bytes followed by a u16
/// length so the top string can be found from the end.

const FLOAT_LEN: usize = 4;
const STR_LEN: usize = 2;

impl Arena {
    pub fn clear_stack(&mut self) {
        self.stack_end = self.prog_end;
    }

    pub fn stack_is_empty(&self) -> bool {
        self.stack_end == self.prog_end
    }

    fn underflow_error(&self) -> Error {
        error!(InternalError; "STACK UNDERFLOW")
    }

    pub fn push_float(&mut self, val: f32) -> Result<()> {
        self.ensure(FLOAT_LEN)?;
        self.write_f32(self.stack_end, val);
        self.stack_end += FLOAT_LEN;
        Ok(())
    }

    pub fn pop_float(&mut self) -> Result<f32> {
        if self.stack_end < self.prog_end + FLOAT_LEN {
            return Err(self.underflow_error());
        }
        self.stack_end -= FLOAT_LEN;
        Ok(self.read_f32(self.stack_end))
    }

    pub fn push_str(&mut self, s: &[u8]) -> Result<()> {
        if s.len() > u16::MAX as usize {
            return Err(error!(OutOfMemory));
        }
        self.ensure(s.len() + STR_LEN)?;
        let at = self.stack_end;
        self.mem[at..at + s.len()].copy_from_slice(s);
        self.finish_str(at, s.len());
        Ok(())
    }

    /// Pushes a copy of bytes already in the arena, such as a variable's
    /// value or a string literal in the program.
    pub fn push_str_within(&mut self, src: Range<usize>) -> Result<()> {
        let len = src.end - src.start;
        self.ensure(len + STR_LEN)?;
        let at = self.stack_end;
        self.mem.copy_within(src, at);
        self.finish_str(at, len);
        Ok(())
    }

    fn finish_str(&mut self, at: usize, len: usize) {
        self.write_u16(at + len, len as u16);
        self.stack_end = at + len + STR_LEN;
    }

    /// Range of the bytes of the string on top of the stack.
    pub fn peek_str(&self) -> Result<Range<usize>> {
        if self.stack_end < self.prog_end + STR_LEN {
            return Err(self.underflow_error());
        }
        let len = self.read_u16(self.stack_end - STR_LEN) as usize;
        let end = self.stack_end - STR_LEN;
        if end < self.prog_end + len {
            return Err(self.underflow_error());
        }
        Ok(end - len..end)
    }

    /// Pops the top string. The returned bytes stay valid until the next push.
    pub fn pop_str(&mut self) -> Result<Range<usize>> {
        let range = self.peek_str()?;
        self.stack_end = range.start;
        Ok(range)
    }

    pub fn str_bytes(&self, range: Range<usize>) -> &[u8] {
        &self.mem[range]
    }

    /// Replaces the top two strings with their concatenation. The second
    /// string slides down over the first one's length field.
    pub fn concat_strs(&mut self) -> Result<()> {
        let second = self.pop_str()?;
        let first = self.pop_str()?;
        let len = first.len() + second.len();
        self.mem.copy_within(second, first.end);
        self.finish_str(first.start, len);
        Ok(())
    }

    /// Keeps the leftmost, or with `from_right` the rightmost, `len` bytes
    /// of the top string.
    pub fn truncate_str(&mut self, len: usize, from_right: bool) -> Result<()> {
        let s = self.pop_str()?;
        let keep = len.min(s.len());
        if from_right {
            self.mem.copy_within(s.end - keep..s.end, s.start);
        }
        self.finish_str(s.start, keep);
        Ok(())
    }

    /// Keeps `len` bytes of the top string starting at 1-based `start`.
    /// Both are clamped to the string.
    pub fn mid_str(&mut self, start: usize, len: usize) -> Result<()> {
        let s = self.pop_str()?;
        let from = start.saturating_sub(1).min(s.len());
        let keep = len.min(s.len() - from);
        self.mem.copy_within(s.start + from..s.start + from + keep, s.start);
        self.finish_str(s.start, keep);
        Ok(())
    }

    /// Tokenizes the top string into the free space above the stack and
    /// reserves it. The caller resets `stack_end` when done with the tokens.
    pub fn tokenize_on_stack(&mut self) -> Result<Range<usize>> {
        let src = self.peek_str()?;
        let (lo, hi) = self.mem.split_at_mut(self.stack_end);
        let room = self.var_start - self.stack_end;
        let len = match tokenize(&lo[src], &mut hi[..room]) {
            Ok(len) => len,
            Err(e) if e.code() == ErrorCode::LineTooLong => return Err(error!(OutOfMemory)),
            Err(e) => return Err(e),
        };
        let tokens = self.stack_end..self.stack_end + len;
        self.stack_end = tokens.end;
        Ok(tokens)
    }
}
