use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Shared memory arena
///
/// One fixed buffer holds every region the interpreter needs:
///
/// ```text
/// 0          prog_end    stack_end        var_start     var_end      len
/// | program   | stack ->  |     free       | variables  | frames     |
/// ```
///
/// The program store and the expression stack grow up from the bottom.
/// Variables and GOSUB frames share the top, frames nearest the end.
/// Every mutation checks the space it needs before touching a byte.
pub struct Arena {
    pub(super) mem: Box<[u8]>,
    pub(super) prog_end: usize,
    pub(super) stack_end: usize,
    pub(super) var_start: usize,
    pub(super) var_end: usize,
}

/// Record offsets are stored as u16 so the arena can not be larger.
pub const MAX_ARENA: usize = u16::MAX as usize;

impl Arena {
    pub fn new(size: usize) -> Arena {
        let size = size.min(MAX_ARENA);
        Arena {
            mem: vec![0; size].into_boxed_slice(),
            prog_end: 0,
            stack_end: 0,
            var_start: size,
            var_end: size,
        }
    }

    /// Empties every region.
    pub fn reset(&mut self) {
        self.mem.iter_mut().for_each(|b| *b = 0);
        self.prog_end = 0;
        self.stack_end = 0;
        self.var_start = self.mem.len();
        self.var_end = self.mem.len();
    }

    pub fn len(&self) -> usize {
        self.mem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mem.is_empty()
    }

    pub fn free(&self) -> usize {
        self.var_start - self.stack_end
    }

    pub(super) fn ensure(&self, needed: usize) -> Result<()> {
        if needed > self.free() {
            log::debug!("out of memory: need {} have {}", needed, self.free());
            Err(error!(OutOfMemory))
        } else {
            Ok(())
        }
    }

    pub fn bytes(&self, range: std::ops::Range<usize>) -> &[u8] {
        &self.mem[range]
    }

    pub(super) fn read_u16(&self, at: usize) -> u16 {
        u16::from_le_bytes([self.mem[at], self.mem[at + 1]])
    }

    pub(super) fn write_u16(&mut self, at: usize, val: u16) {
        self.mem[at..at + 2].copy_from_slice(&val.to_le_bytes());
    }

    pub(super) fn read_f32(&self, at: usize) -> f32 {
        let b = &self.mem[at..at + 4];
        f32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    pub(super) fn write_f32(&mut self, at: usize, val: f32) {
        self.mem[at..at + 4].copy_from_slice(&val.to_le_bytes());
    }

    #[cfg(debug_assertions)]
    pub(super) fn check_invariant(&self) {
        debug_assert!(self.prog_end <= self.stack_end);
        debug_assert!(self.stack_end <= self.var_start);
        debug_assert!(self.var_start <= self.var_end);
        debug_assert!(self.var_end <= self.mem.len());
    }

    #[cfg(not(debug_assertions))]
    pub(super) fn check_invariant(&self) {}
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Arena {{ prog_end: {}, stack_end: {}, var_start: {}, var_end: {}, len: {} }}",
            self.prog_end,
            self.stack_end,
            self.var_start,
            self.var_end,
            self.mem.len()
        )
    }
}
