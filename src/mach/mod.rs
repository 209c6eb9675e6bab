/*!
## Rust Machine Module

This Rust module holds the arena and the interpreter that runs BASIC
directly from its tokens.

*/

/// A statement position: line number and statement index within the line.
/// Line 0 is the direct line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    pub line: u16,
    pub stmt: u16,
}

mod arena;
mod eval;
mod function;
mod gosub;
mod host;
mod listing;
mod operation;
mod program;
mod runtime;
mod stack;
mod statement;
mod val;
mod var;

pub use arena::{Arena, MAX_ARENA};
pub use function::{Function, FunctionSpec};
pub use host::{no_such_program, slot_from_name, slot_name, BufferHost, Host};
pub use operation::Operation;
pub use program::Lines;
pub use runtime::Runtime;
pub use val::ValType;
pub use var::LoopControl;
