//! # Micro BASIC
//!
//! A line-numbered BASIC for machines with a few kilobytes of memory.
//!

fn main() {
    basic::term::main();
}
