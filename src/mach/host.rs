use crate::error;
use crate::lang::{Error, SAVE_SLOTS};
use std::collections::{BTreeMap, HashMap, VecDeque};

type Result<T> = std::result::Result<T, Error>;

/// ## Host collaborator
///
/// Everything the interpreter needs from the machine it runs on: the
/// screen, the keyboard, time, pins and program storage.
pub trait Host {
    fn write_str(&mut self, s: &str);

    fn write_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.write_str(ch.encode_utf8(&mut buf));
    }

    /// BASIC strings are bytes; each byte is shown as one character.
    fn write_bytes(&mut self, bytes: &[u8]) {
        let s: String = bytes.iter().map(|&b| b as char).collect();
        self.write_str(&s);
    }

    fn new_line(&mut self) {
        self.write_char('\n');
    }

    /// One line of user input. `None` when input was cancelled.
    fn read_line(&mut self) -> Option<String>;

    /// The last key pressed, cleared by reading it.
    fn poll_key(&mut self) -> Option<char>;

    /// True when the user asked to stop the running program.
    fn poll_break(&mut self) -> bool;

    fn sleep(&mut self, ms: u32);
    fn cls(&mut self);
    fn move_cursor(&mut self, x: i32, y: i32);

    fn digital_read(&mut self, pin: i32) -> i32;
    fn digital_write(&mut self, pin: i32, state: i32);
    fn analog_read(&mut self, pin: i32) -> i32;
    fn pin_mode(&mut self, pin: i32, mode: i32);

    fn save_program(&mut self, slot: u16, autorun: bool, image: &[u8]) -> Result<()>;
    fn load_program(&mut self, slot: u16) -> Result<Vec<u8>>;
    /// One printable row per saved program.
    fn list_programs(&mut self) -> Result<Vec<String>>;
    fn delete_program(&mut self, name: &str) -> Result<()>;
}

/// Name shown by DIR for a slot.
pub fn slot_name(slot: u16) -> String {
    format!("PROGRAM{}", slot)
}

/// Accepts `3`, `PROGRAM3` or `program3.bas`.
pub fn slot_from_name(name: &str) -> Option<u16> {
    let upper = name.trim().to_ascii_uppercase();
    let upper = upper.strip_suffix(".BAS").unwrap_or(&upper);
    let digits = upper.strip_prefix("PROGRAM").unwrap_or(upper);
    match digits.parse::<u16>() {
        Ok(slot) if slot < SAVE_SLOTS => Some(slot),
        _ => None,
    }
}

pub fn no_such_program() -> Error {
    error!(BadParameter; "NO SUCH PROGRAM")
}

/// In-memory host. Output is collected, input and key presses are
/// scripted and program slots are kept in a map.
#[derive(Debug, Default)]
pub struct BufferHost {
    pub output: String,
    pub input: VecDeque<String>,
    pub keys: VecDeque<char>,
    /// Number of `poll_break` calls answered false before answering true.
    pub break_after: Option<usize>,
    pub pins: HashMap<i32, i32>,
    pub pin_modes: HashMap<i32, i32>,
    pub analog: HashMap<i32, i32>,
    pub cursor: (i32, i32),
    pub slept_ms: u64,
    pub slots: BTreeMap<u16, (bool, Vec<u8>)>,
}

impl BufferHost {
    pub fn new() -> BufferHost {
        BufferHost::default()
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Host for BufferHost {
    fn write_str(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn read_line(&mut self) -> Option<String> {
        self.input.pop_front()
    }

    fn poll_key(&mut self) -> Option<char> {
        self.keys.pop_front()
    }

    fn poll_break(&mut self) -> bool {
        match self.break_after {
            Some(0) => true,
            Some(n) => {
                self.break_after = Some(n - 1);
                false
            }
            None => false,
        }
    }

    fn sleep(&mut self, ms: u32) {
        self.slept_ms += ms as u64;
    }

    fn cls(&mut self) {
        self.output.clear();
    }

    fn move_cursor(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    fn digital_read(&mut self, pin: i32) -> i32 {
        self.pins.get(&pin).copied().unwrap_or(0)
    }

    fn digital_write(&mut self, pin: i32, state: i32) {
        self.pins.insert(pin, if state != 0 { 1 } else { 0 });
    }

    fn analog_read(&mut self, pin: i32) -> i32 {
        self.analog.get(&pin).copied().unwrap_or(0)
    }

    fn pin_mode(&mut self, pin: i32, mode: i32) {
        self.pin_modes.insert(pin, mode);
    }

    fn save_program(&mut self, slot: u16, autorun: bool, image: &[u8]) -> Result<()> {
        self.slots.insert(slot, (autorun, image.to_vec()));
        Ok(())
    }

    fn load_program(&mut self, slot: u16) -> Result<Vec<u8>> {
        match self.slots.get(&slot) {
            Some((_, image)) => Ok(image.clone()),
            None => Err(no_such_program()),
        }
    }

    fn list_programs(&mut self) -> Result<Vec<String>> {
        Ok(self
            .slots
            .iter()
            .map(|(&slot, (autorun, image))| {
                let mark = if *autorun { " AUTORUN" } else { "" };
                format!("{} {} BYTES{}", slot_name(slot), image.len(), mark)
            })
            .collect())
    }

    fn delete_program(&mut self, name: &str) -> Result<()> {
        let slot = slot_from_name(name).ok_or_else(no_such_program)?;
        match self.slots.remove(&slot) {
            Some(_) => Ok(()),
            None => Err(no_such_program()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_names() {
        assert_eq!(slot_from_name("3"), Some(3));
        assert_eq!(slot_from_name("program2"), Some(2));
        assert_eq!(slot_from_name("PROGRAM0.BAS"), Some(0));
        assert_eq!(slot_from_name("PROGRAM9"), None);
        assert_eq!(slot_from_name("hello"), None);
        assert_eq!(slot_from_name(&slot_name(5)), Some(5));
    }

    #[test]
    fn test_break_after() {
        let mut h = BufferHost::new();
        h.break_after = Some(1);
        assert!(!h.poll_break());
        assert!(h.poll_break());
    }
}
