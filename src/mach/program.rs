use super::Arena;
use crate::error;
use crate::lang::{decode, Error, Tok, TOKEN_EOL};
use std::ops::Range;

type Result<T> = std::result::Result<T, Error>;

/// Bytes before the tokens: total length then line number.
const LINE_HEADER: usize = 4;

/// ## Program store
///
/// Lines are `[len: u16][number: u16][tokens .. EOL]`, packed from offset 0
/// in ascending line number order.

impl Arena {
    /// Offset of the first line numbered `number` or higher,
    /// or the end of the program.
    pub fn find_line(&self, number: u16) -> usize {
        let mut p = 0;
        while p < self.prog_end {
            if self.read_u16(p + 2) >= number {
                break;
            }
            p += self.read_u16(p) as usize;
        }
        p
    }

    /// Number and token range of the line at `offset`.
    pub fn line_at(&self, offset: usize) -> Option<(u16, Range<usize>)> {
        if offset >= self.prog_end {
            return None;
        }
        let len = self.read_u16(offset) as usize;
        Some((self.read_u16(offset + 2), offset + LINE_HEADER..offset + len))
    }

    /// Inserts, replaces or, when `tokens` is empty, deletes a line.
    /// `tokens` ends with EOL.
    pub fn insert_line(&mut self, number: u16, tokens: &[u8]) -> Result<()> {
        debug_assert_eq!(self.stack_end, self.prog_end);
        let p = self.find_line(number);
        let old_len = match self.line_at(p) {
            Some((found, _)) if found == number => self.read_u16(p) as usize,
            _ => 0,
        };
        let empty = tokens.first().map_or(true, |&t| t == TOKEN_EOL);
        let new_len = if empty { 0 } else { LINE_HEADER + tokens.len() };
        if new_len > u16::MAX as usize {
            return Err(error!(OutOfMemory));
        }
        if new_len > old_len {
            self.ensure(new_len - old_len)?;
        }
        let tail = p + old_len..self.prog_end;
        let new_end = self.prog_end + new_len - old_len;
        self.mem.copy_within(tail, p + new_len);
        if new_len > 0 {
            self.write_u16(p, new_len as u16);
            self.write_u16(p + 2, number);
            self.mem[p + LINE_HEADER..p + new_len].copy_from_slice(tokens);
        }
        self.prog_end = new_end;
        self.stack_end = new_end;
        self.check_invariant();
        Ok(())
    }

    /// The raw program image, as written by SAVE.
    pub fn program_bytes(&self) -> &[u8] {
        &self.mem[..self.prog_end]
    }

    /// Installs a saved program image into an empty arena.
    pub fn load_program(&mut self, image: &[u8]) -> Result<()> {
        validate_image(image)?;
        if image.len() > self.var_start {
            return Err(error!(OutOfMemory));
        }
        self.mem[..image.len()].copy_from_slice(image);
        self.prog_end = image.len();
        self.stack_end = image.len();
        self.check_invariant();
        Ok(())
    }

    /// Iterates over `(number, tokens)` of every stored line.
    pub fn lines(&self) -> Lines<'_> {
        Lines {
            arena: self,
            offset: 0,
        }
    }
}

pub struct Lines<'a> {
    arena: &'a Arena,
    offset: usize,
}

impl<'a> Iterator for Lines<'a> {
    type Item = (u16, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let (number, range) = self.arena.line_at(self.offset)?;
        self.offset = range.end;
        Some((number, &self.arena.mem[range]))
    }
}

/// Checks that a saved image is a well formed run of lines.
pub(super) fn validate_image(image: &[u8]) -> Result<()> {
    let bad = || error!(StorageError; "CORRUPT PROGRAM");
    let mut p = 0;
    let mut last = 0u16;
    while p < image.len() {
        let header = image.get(p..p + LINE_HEADER).ok_or_else(bad)?;
        let len = u16::from_le_bytes([header[0], header[1]]) as usize;
        let number = u16::from_le_bytes([header[2], header[3]]);
        if len <= LINE_HEADER || p + len > image.len() || number <= last {
            return Err(bad());
        }
        let tokens = &image[p + LINE_HEADER..p + len];
        let mut pos = 0;
        loop {
            let (tok, next) = decode(tokens, pos);
            if tok == Tok::Eol {
                break;
            }
            pos = next;
        }
        if pos + 1 != tokens.len() || tokens[pos] != TOKEN_EOL {
            return Err(bad());
        }
        last = number;
        p += len;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    const PRINT_1: &[u8] = &[26, 3, 1, 0, 0, 0, 0];

    #[test]
    fn test_insert_in_order() {
        let mut a = Arena::new(64);
        a.insert_line(20, PRINT_1).unwrap();
        a.insert_line(10, PRINT_1).unwrap();
        a.insert_line(30, PRINT_1).unwrap();
        let numbers: Vec<u16> = a.lines().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![10, 20, 30]);
        assert_eq!(a.find_line(15), 11);
        assert_eq!(a.line_at(a.find_line(15)).unwrap().0, 20);
    }

    #[test]
    fn test_replace_and_delete() {
        let mut a = Arena::new(64);
        a.insert_line(10, PRINT_1).unwrap();
        a.insert_line(20, PRINT_1).unwrap();
        a.insert_line(10, &[0]).unwrap();
        let numbers: Vec<u16> = a.lines().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![20]);
        a.insert_line(99, &[0]).unwrap();
        assert_eq!(a.program_bytes().len(), 11);
        a.insert_line(20, &[26, 0]).unwrap();
        assert_eq!(a.lines().next().unwrap().1, &[26, 0]);
    }

    #[test]
    fn test_out_of_memory_leaves_program() {
        let mut a = Arena::new(20);
        a.insert_line(10, PRINT_1).unwrap();
        let before = a.program_bytes().to_vec();
        let err = a.insert_line(20, PRINT_1).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutOfMemory);
        assert_eq!(a.program_bytes(), &before[..]);
    }

    #[test]
    fn test_load_program_validates() {
        let mut a = Arena::new(64);
        a.insert_line(10, PRINT_1).unwrap();
        a.insert_line(20, PRINT_1).unwrap();
        let image = a.program_bytes().to_vec();
        let mut b = Arena::new(64);
        b.load_program(&image).unwrap();
        assert_eq!(b.program_bytes(), &image[..]);
        let mut bad = image.clone();
        bad[2] = 30;
        assert_eq!(
            b.load_program(&bad).unwrap_err().code(),
            ErrorCode::StorageError
        );
        assert!(b.load_program(&image[..5]).is_err());
    }
}
