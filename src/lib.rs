//! # Micro BASIC
//!
//! A line-numbered BASIC for machines with a few kilobytes of memory.
//!
//! The program, the expression stack, the variables and the GOSUB return
//! addresses all share one fixed block of memory. Lines are stored as
//! tokens and interpreted directly from them, so nothing is compiled and
//! nothing is allocated while a program runs.
//!
//! ```
//! use basic::mach::{BufferHost, Runtime};
//!
//! let mut runtime = Runtime::new(BufferHost::new(), 1024);
//! runtime.enter("10 FOR I = 1 TO 3").unwrap();
//! runtime.enter("20 PRINT I;").unwrap();
//! runtime.enter("30 NEXT I").unwrap();
//! runtime.enter("RUN").unwrap();
//! assert_eq!(runtime.host_mut().take_output(), "123");
//! ```

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/chapter_1.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_1;

#[path = "doc/chapter_2.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_2;

#[path = "doc/appendix_a.rs"]
#[allow(non_snake_case)]
pub mod ___Appendix_A;

pub mod lang;
pub mod mach;
pub mod term;
