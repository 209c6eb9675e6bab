use super::{Address, Arena};
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

const FRAME_LEN: usize = 4;

/// ## GOSUB frames
///
/// Frames live between the variable table and the end of the arena. A push
/// slides the whole variable table down to open a slot directly above it,
/// so the newest frame always sits at `var_end`. A pop slides it back.

impl Arena {
    pub fn push_frame(&mut self, ret: Address) -> Result<()> {
        self.ensure(FRAME_LEN)?;
        let vars = self.var_start..self.var_end;
        self.mem.copy_within(vars, self.var_start - FRAME_LEN);
        self.var_start -= FRAME_LEN;
        self.var_end -= FRAME_LEN;
        self.write_u16(self.var_end, ret.line);
        self.write_u16(self.var_end + 2, ret.stmt);
        self.check_invariant();
        Ok(())
    }

    pub fn pop_frame(&mut self) -> Option<Address> {
        if self.var_end == self.mem.len() {
            return None;
        }
        let ret = Address {
            line: self.read_u16(self.var_end),
            stmt: self.read_u16(self.var_end + 2),
        };
        let vars = self.var_start..self.var_end;
        self.mem.copy_within(vars, self.var_start + FRAME_LEN);
        self.var_start += FRAME_LEN;
        self.var_end += FRAME_LEN;
        self.check_invariant();
        Some(ret)
    }

    pub fn frame_depth(&self) -> usize {
        (self.mem.len() - self.var_end) / FRAME_LEN
    }
}
