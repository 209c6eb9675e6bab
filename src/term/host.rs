use super::storage::SlotStore;
use crate::lang::Error;
use crate::mach::Host;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use log::{debug, warn};
use mortal::{Event, Key, PrepareConfig, Terminal};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

type Result<T> = std::result::Result<T, Error>;

/// Host for an interactive terminal. Pins are simulated in memory.
pub struct TerminalHost {
    input: Interface<DefaultTerminal>,
    screen: Option<Terminal>,
    interrupted: Arc<AtomicBool>,
    store: SlotStore,
    pins: HashMap<i32, i32>,
}

impl TerminalHost {
    pub fn new(store: SlotStore, interrupted: Arc<AtomicBool>) -> std::io::Result<TerminalHost> {
        let input = Interface::new("INPUT")?;
        input.set_report_signal(Signal::Interrupt, true);
        input.set_prompt("? ")?;
        Ok(TerminalHost {
            input,
            screen: Terminal::new().ok(),
            interrupted,
            store,
            pins: HashMap::new(),
        })
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }
}

/// ANSI cursor position. BASIC counts from 0, the terminal from 1.
fn cursor_position(x: i32, y: i32) -> String {
    format!("\x1b[{};{}H", y.max(0) + 1, x.max(0) + 1)
}

impl Host for TerminalHost {
    fn write_str(&mut self, s: &str) {
        if let Err(error) = self.input.write_fmt(format_args!("{}", s)) {
            warn!("{}", error);
        }
    }

    fn read_line(&mut self) -> Option<String> {
        match self.input.read_line() {
            Ok(ReadResult::Input(line)) => Some(line),
            Ok(ReadResult::Signal(_)) | Ok(ReadResult::Eof) => {
                let _ = self.input.set_buffer("");
                None
            }
            Err(error) => {
                warn!("{}", error);
                None
            }
        }
    }

    fn poll_key(&mut self) -> Option<char> {
        let screen = self.screen.as_ref()?;
        let state = screen.prepare(PrepareConfig::default()).ok()?;
        let event = screen.read_event(Some(Duration::from_millis(0)));
        let _ = screen.restore(state);
        match event {
            Ok(Some(Event::Key(Key::Char(ch)))) => Some(ch),
            Ok(Some(Event::Key(Key::Enter))) => Some('\r'),
            _ => None,
        }
    }

    fn poll_break(&mut self) -> bool {
        self.interrupted.swap(false, Ordering::SeqCst)
    }

    fn sleep(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }

    fn cls(&mut self) {
        if let Some(screen) = &self.screen {
            let _ = screen.clear_screen();
        }
    }

    fn move_cursor(&mut self, x: i32, y: i32) {
        self.write_str(&cursor_position(x, y));
    }

    fn digital_read(&mut self, pin: i32) -> i32 {
        self.pins.get(&pin).copied().unwrap_or(0)
    }

    fn digital_write(&mut self, pin: i32, state: i32) {
        debug!("pin {} = {}", pin, state);
        self.pins.insert(pin, if state != 0 { 1 } else { 0 });
    }

    fn analog_read(&mut self, pin: i32) -> i32 {
        self.pins.get(&pin).map_or(0, |&s| s * 1023)
    }

    fn pin_mode(&mut self, pin: i32, mode: i32) {
        debug!("pin {} mode {}", pin, mode);
    }

    fn save_program(&mut self, slot: u16, autorun: bool, image: &[u8]) -> Result<()> {
        self.store.save(slot, autorun, image)
    }

    fn load_program(&mut self, slot: u16) -> Result<Vec<u8>> {
        Ok(self.store.load(slot)?.image)
    }

    fn list_programs(&mut self) -> Result<Vec<String>> {
        self.store.list()
    }

    fn delete_program(&mut self, name: &str) -> Result<()> {
        self.store.delete(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_position() {
        assert_eq!(cursor_position(0, 0), "\x1b[1;1H");
        assert_eq!(cursor_position(9, 4), "\x1b[5;10H");
        assert_eq!(cursor_position(-3, -1), "\x1b[1;1H");
    }
}
