#![allow(dead_code)]
use basic::mach::{BufferHost, Runtime};

pub fn runtime() -> Runtime<BufferHost> {
    Runtime::default()
}

/// Enters one line. Returns what it printed followed by `?ERROR` when it
/// failed.
pub fn exec(runtime: &mut Runtime<BufferHost>, line: &str) -> String {
    let result = runtime.enter(line);
    let mut s = runtime.host_mut().take_output();
    if let Err(error) = result {
        s.push_str(&format!("?{}\n", error));
    }
    s
}

/// A runtime holding `lines`, each of which must enter cleanly.
pub fn program(lines: &[&str]) -> Runtime<BufferHost> {
    let mut r = runtime();
    for line in lines {
        assert_eq!(exec(&mut r, line), "", "entering {}", line);
    }
    r
}
