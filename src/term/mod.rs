/*!
## Rust Terminal Module

Runs the interpreter as an interactive program with line editing,
Ctrl-C to break, and program slots saved as files.

*/

mod config;
mod host;
mod storage;

pub use config::Config;
pub use host::TerminalHost;
pub use storage::{SavedProgram, SlotStore};

use crate::lang::Error;
use crate::mach::Runtime;
use ansi_term::Style;
use linefeed::{Completer, Completion, Interface, Prompter, ReadResult, Terminal};
use log::info;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn main() {
    let config = Config::from_env();
    config.init_logging();
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    if let Err(error) = main_loop(config, interrupted) {
        eprintln!("{}", error);
    }
}

fn main_loop(config: Config, interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    info!("{:?}", config);
    let command = Interface::new("BASIC")?;
    let host = TerminalHost::new(SlotStore::new(&config.slots), interrupted.clone())?;
    let mut runtime = Runtime::new(host, config.memory);
    command.write_fmt(format_args!(
        "MICRO BASIC\n{} BYTES FREE\n",
        runtime.free_memory()
    ))?;

    if let Some(slot) = runtime.host().store().autorun_slot() {
        info!("autorun slot {}", slot);
        let result = runtime
            .enter(&format!("LOAD {}", slot))
            .and_then(|_| runtime.enter("RUN"));
        if let Err(error) = result {
            print_error(&command, &error)?;
        }
    }

    let mut print_ready = true;
    loop {
        if print_ready {
            print_ready = false;
            command.write_fmt(format_args!("READY.\n"))?;
        }
        let saved_completer = command.completer();
        command.set_completer(Arc::new(LineCompleter::new(&runtime)));
        let string = match command.read_line()? {
            ReadResult::Input(string) => string,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        command.set_completer(saved_completer);
        if string.trim().is_empty() {
            continue;
        }
        interrupted.store(false, Ordering::SeqCst);
        match runtime.enter(&string) {
            Ok(()) => print_ready = !starts_with_number(&string),
            Err(error) => {
                print_error(&command, &error)?;
                print_ready = true;
            }
        }
        command.add_history_unique(string);
    }
    Ok(())
}

fn starts_with_number(s: &str) -> bool {
    s.trim_start().starts_with(|ch: char| ch.is_ascii_digit())
}

fn print_error<T: Terminal>(interface: &Interface<T>, error: &Error) -> std::io::Result<()> {
    interface.write_fmt(format_args!(
        "{}\n",
        Style::new().bold().paint(format!("?{}", error))
    ))
}

/// Completes a bare line number to that line's listing, for editing.
struct LineCompleter {
    lines: BTreeMap<u16, String>,
}

impl LineCompleter {
    fn new(runtime: &Runtime<TerminalHost>) -> LineCompleter {
        let arena = runtime.arena();
        let lines = arena
            .line_numbers()
            .filter_map(|n| arena.line_text(n).map(|text| (n, text)))
            .collect();
        LineCompleter { lines }
    }
}

impl<Term: Terminal> Completer<Term> for LineCompleter {
    fn complete(
        &self,
        _word: &str,
        prompter: &Prompter<Term>,
        _start: usize,
        _end: usize,
    ) -> Option<Vec<Completion>> {
        let num = prompter.buffer().trim().parse::<u16>().ok()?;
        let text = self.lines.get(&num)?;
        let mut comp = Completion::simple(text.clone());
        comp.suffix = linefeed::complete::Suffix::None;
        Some(vec![comp])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_number() {
        assert!(starts_with_number(" 10 PRINT"));
        assert!(!starts_with_number("PRINT 10"));
    }
}
