use super::arena::MAX_ARENA;
use super::Arena;
use crate::error;
use crate::lang::{Error, Name};
use std::ops::Range;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable table
///
/// Records are `[len: u16][kind: u8][name len: u8][name][payload]`, packed
/// below the GOSUB frames and growing down. New records go at the bottom.
/// Lookup is a linear scan, case-insensitive, filtered by kind.

pub const VAR_NUM: u8 = 0x1;
pub const VAR_FOR_NEXT: u8 = 0x2;
pub const VAR_NUM_ARRAY: u8 = 0x4;
pub const VAR_STRING: u8 = 0x8;
pub const VAR_STR_ARRAY: u8 = 0x10;

const VAR_HEADER: usize = 4;
const LOOP_PAYLOAD: usize = 16;

/// State of an active FOR loop. `line` and `stmt` address the FOR itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopControl {
    pub val: f32,
    pub step: f32,
    pub end: f32,
    pub line: u16,
    pub stmt: u16,
}

impl LoopControl {
    /// True while the loop should run again.
    pub fn in_range(&self) -> bool {
        if self.step >= 0.0 {
            self.val <= self.end
        } else {
            self.val >= self.end
        }
    }
}

impl Arena {
    pub fn clear_variables(&mut self) {
        self.var_start = self.mem.len();
        self.var_end = self.mem.len();
    }

    pub fn variable_bytes(&self) -> usize {
        self.var_end - self.var_start
    }

    pub fn find_variable(&self, name: &Name, mask: u8) -> Option<usize> {
        let mut p = self.var_start;
        while p < self.var_end {
            if self.mem[p + 2] & mask != 0 {
                let len = self.mem[p + 3] as usize;
                if name.eq_ignore_case(&self.mem[p + VAR_HEADER..p + VAR_HEADER + len]) {
                    return Some(p);
                }
            }
            p += self.read_u16(p) as usize;
        }
        None
    }

    fn record_len(&self, rec: usize) -> usize {
        self.read_u16(rec) as usize
    }

    fn payload_at(&self, rec: usize) -> usize {
        rec + VAR_HEADER + self.mem[rec + 3] as usize
    }

    fn delete_variable_at(&mut self, rec: usize) {
        let len = self.record_len(rec);
        self.mem.copy_within(self.var_start..rec, self.var_start + len);
        self.var_start += len;
    }

    /// Allocates a record, first removing `existing`. The space check
    /// happens before anything moves. Returns the payload offset.
    fn allocate_variable(
        &mut self,
        existing: Option<usize>,
        kind: u8,
        name: &Name,
        payload_len: usize,
    ) -> Result<usize> {
        let name = name.as_bytes();
        let size = VAR_HEADER + name.len() + payload_len;
        if size > u16::MAX as usize {
            return Err(error!(OutOfMemory));
        }
        let reclaimed = existing.map_or(0, |rec| self.record_len(rec));
        if size > reclaimed {
            self.ensure(size - reclaimed)?;
        }
        if let Some(rec) = existing {
            self.delete_variable_at(rec);
        }
        self.var_start -= size;
        let rec = self.var_start;
        self.write_u16(rec, size as u16);
        self.mem[rec + 2] = kind;
        self.mem[rec + 3] = name.len() as u8;
        self.mem[rec + VAR_HEADER..rec + VAR_HEADER + name.len()].copy_from_slice(name);
        let payload = rec + VAR_HEADER + name.len();
        self.mem[payload..payload + payload_len]
            .iter_mut()
            .for_each(|b| *b = 0);
        self.check_invariant();
        Ok(payload)
    }

    pub fn lookup_scalar(&self, name: &Name) -> Result<f32> {
        match self.find_variable(name, VAR_NUM | VAR_FOR_NEXT) {
            Some(rec) => Ok(self.read_f32(self.payload_at(rec))),
            None => Err(error!(VariableNotFound)),
        }
    }

    /// Updates in place when the name exists, including a loop variable.
    pub fn store_scalar(&mut self, name: &Name, val: f32) -> Result<()> {
        let at = match self.find_variable(name, VAR_NUM | VAR_FOR_NEXT) {
            Some(rec) => self.payload_at(rec),
            None => self.allocate_variable(None, VAR_NUM, name, 4)?,
        };
        self.write_f32(at, val);
        Ok(())
    }

    /// Always reallocates; a plain scalar of the same name is replaced.
    pub fn store_loop_control(&mut self, name: &Name, lc: &LoopControl) -> Result<()> {
        let existing = self.find_variable(name, VAR_NUM | VAR_FOR_NEXT);
        let at = self.allocate_variable(existing, VAR_FOR_NEXT, name, LOOP_PAYLOAD)?;
        self.write_f32(at, lc.val);
        self.write_f32(at + 4, lc.step);
        self.write_f32(at + 8, lc.end);
        self.write_u16(at + 12, lc.line);
        self.write_u16(at + 14, lc.stmt);
        Ok(())
    }

    pub fn lookup_loop_control(&self, name: &Name) -> Result<LoopControl> {
        let rec = match self.find_variable(name, VAR_NUM | VAR_FOR_NEXT) {
            Some(rec) => rec,
            None => return Err(error!(VariableNotFound)),
        };
        if self.mem[rec + 2] != VAR_FOR_NEXT {
            return Err(error!(NextWithoutFor));
        }
        let at = self.payload_at(rec);
        Ok(LoopControl {
            val: self.read_f32(at),
            step: self.read_f32(at + 4),
            end: self.read_f32(at + 8),
            line: self.read_u16(at + 12),
            stmt: self.read_u16(at + 14),
        })
    }

    /// Range of a string variable's bytes.
    pub fn lookup_string(&self, name: &Name) -> Result<Range<usize>> {
        match self.find_variable(name, VAR_STRING) {
            Some(rec) => {
                let at = self.payload_at(rec);
                let len = self.read_u16(at) as usize;
                Ok(at + 2..at + 2 + len)
            }
            None => Err(error!(VariableNotFound)),
        }
    }

    /// Pops the top string off the stack into a string variable.
    pub fn store_string_from_stack(&mut self, name: &Name) -> Result<()> {
        let src = self.peek_str()?;
        let len = src.end - src.start;
        let existing = self.find_variable(name, VAR_STRING);
        let at = self.allocate_variable(existing, VAR_STRING, name, 2 + len)?;
        self.write_u16(at, len as u16);
        self.mem.copy_within(src, at + 2);
        self.pop_str()?;
        Ok(())
    }

    /// Locates `[x1 .. xn][n]` ending at `end` on the stack.
    /// Returns the offset of `x1` and `n`.
    fn subscripts_below(&self, end: usize) -> Result<(usize, usize)> {
        if end < self.prog_end + 4 {
            return Err(error!(InternalError; "STACK UNDERFLOW"));
        }
        let n = self.read_f32(end - 4) as usize;
        match (end - 4).checked_sub(4 * n) {
            Some(base) if base >= self.prog_end => Ok((base, n)),
            _ => Err(error!(InternalError; "STACK UNDERFLOW")),
        }
    }

    fn subscript(&self, base: usize, i: usize) -> i32 {
        self.read_f32(base + 4 * i) as i32
    }

    /// Creates an array from dimensions on the stack, replacing any array
    /// of the same name and kind. Cells start at zero or empty.
    pub fn create_array_from_stack(&mut self, name: &Name, is_string: bool) -> Result<()> {
        let (base, n) = self.subscripts_below(self.stack_end)?;
        let mut cells: usize = 1;
        for i in 0..n {
            let dim = self.subscript(base, i);
            if dim < 1 || dim > u16::MAX as i32 {
                return Err(error!(ArraySubscriptOutOfRange));
            }
            cells = cells.saturating_mul(dim as usize);
        }
        let cell_len = if is_string { 1 } else { 4 };
        if cells > MAX_ARENA {
            return Err(error!(OutOfMemory));
        }
        let payload_len = 2 + 2 * n + cells * cell_len;
        let kind = if is_string { VAR_STR_ARRAY } else { VAR_NUM_ARRAY };
        let existing = self.find_variable(name, kind);
        // The dimensions stay on the stack until copied into the record.
        let at = self.allocate_variable(existing, kind, name, payload_len)?;
        self.write_u16(at, n as u16);
        for i in 0..n {
            let dim = self.subscript(base, i) as u16;
            self.write_u16(at + 2 + 2 * i, dim);
        }
        self.stack_end = base;
        Ok(())
    }

    /// Checks subscripts against an array record. Returns the offset of
    /// the first cell and the row-major index of the element.
    fn element_index(&self, rec: usize, base: usize, n: usize) -> Result<(usize, usize)> {
        let payload = self.payload_at(rec);
        let ndims = self.read_u16(payload) as usize;
        if ndims != n {
            return Err(error!(WrongArrayDimensions));
        }
        let mut index = 0;
        for i in 0..n {
            let dim = self.read_u16(payload + 2 + 2 * i) as usize;
            let x = self.subscript(base, i);
            if x < 1 || x as usize > dim {
                return Err(error!(ArraySubscriptOutOfRange));
            }
            index = index * dim + (x as usize - 1);
        }
        Ok((payload + 2 + 2 * ndims, index))
    }

    fn find_array(&self, name: &Name, kind: u8) -> Result<usize> {
        self.find_variable(name, kind)
            .ok_or_else(|| error!(VariableNotFound))
    }

    /// Byte range of string cell `index`.
    fn str_cell(&self, cells: usize, index: usize) -> Range<usize> {
        let mut c = cells;
        for _ in 0..index {
            while self.mem[c] != 0 {
                c += 1;
            }
            c += 1;
        }
        let mut end = c;
        while self.mem[end] != 0 {
            end += 1;
        }
        c..end
    }

    /// Pops subscripts and returns the element's value.
    pub fn lookup_num_element(&mut self, name: &Name) -> Result<f32> {
        let (base, n) = self.subscripts_below(self.stack_end)?;
        let rec = self.find_array(name, VAR_NUM_ARRAY)?;
        let (cells, index) = self.element_index(rec, base, n)?;
        self.stack_end = base;
        Ok(self.read_f32(cells + 4 * index))
    }

    /// Pops subscripts and stores `val` in the element.
    pub fn store_num_element(&mut self, name: &Name, val: f32) -> Result<()> {
        let (base, n) = self.subscripts_below(self.stack_end)?;
        let rec = self.find_array(name, VAR_NUM_ARRAY)?;
        let (cells, index) = self.element_index(rec, base, n)?;
        self.write_f32(cells + 4 * index, val);
        self.stack_end = base;
        Ok(())
    }

    /// Pops subscripts and returns the range of the element's bytes.
    pub fn lookup_str_element(&mut self, name: &Name) -> Result<Range<usize>> {
        let (base, n) = self.subscripts_below(self.stack_end)?;
        let rec = self.find_array(name, VAR_STR_ARRAY)?;
        let (cells, index) = self.element_index(rec, base, n)?;
        self.stack_end = base;
        Ok(self.str_cell(cells, index))
    }

    /// Stack holds `[subscripts][n][string]`. Replaces the element with the
    /// string, growing or shrinking the record and shifting every variable
    /// below it.
    pub fn store_str_element_from_stack(&mut self, name: &Name) -> Result<()> {
        let src = self.peek_str()?;
        let (base, n) = self.subscripts_below(src.start)?;
        let rec = self.find_array(name, VAR_STR_ARRAY)?;
        let (cells, index) = self.element_index(rec, base, n)?;
        let cell = self.str_cell(cells, index);
        let old_len = cell.end - cell.start;
        let new_len = src.end - src.start;
        let (rec, start) = if new_len >= old_len {
            let grow = new_len - old_len;
            // stack_end is still above the source string
            self.ensure(grow)?;
            if self.record_len(rec) + grow > u16::MAX as usize {
                return Err(error!(OutOfMemory));
            }
            self.mem
                .copy_within(self.var_start..cell.start, self.var_start - grow);
            self.var_start -= grow;
            let rec = rec - grow;
            self.write_u16(rec, (self.record_len(rec) + grow) as u16);
            (rec, cell.start - grow)
        } else {
            let shrink = old_len - new_len;
            self.mem
                .copy_within(self.var_start..cell.start, self.var_start + shrink);
            self.var_start += shrink;
            let rec = rec + shrink;
            self.write_u16(rec, (self.record_len(rec) - shrink) as u16);
            (rec, cell.start + shrink)
        };
        debug_assert!(rec >= self.var_start);
        self.mem.copy_within(src, start);
        self.stack_end = base;
        self.check_invariant();
        Ok(())
    }
}
