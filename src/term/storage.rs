use crate::error;
use crate::lang::{Error, SAVE_SLOTS};
use crate::mach::{no_such_program, slot_from_name, slot_name};
use chrono::{DateTime, TimeZone, Utc};
use crc::crc32::checksum_ieee;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, Error>;

const MAGIC: &[u8; 4] = b"MBAS";
/// Magic, autorun flag, save time, image length, image checksum.
const HEADER_LEN: usize = 4 + 1 + 8 + 4 + 4;

/// A program image read back from a slot file.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedProgram {
    pub autorun: bool,
    pub saved: DateTime<Utc>,
    pub image: Vec<u8>,
}

/// ## Program slots
///
/// Each slot is one file named `PROGRAM<n>.BAS` in the slot directory.
/// The file holds a small header followed by the raw program image so a
/// loaded program never needs to be tokenized again.
#[derive(Debug, Clone)]
pub struct SlotStore {
    dir: PathBuf,
}

fn storage_error(error: std::io::Error) -> Error {
    error!(StorageError; &error.to_string())
}

impl SlotStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> SlotStore {
        SlotStore {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self, slot: u16) -> PathBuf {
        self.dir.join(format!("{}.BAS", slot_name(slot)))
    }

    pub fn save(&self, slot: u16, autorun: bool, image: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(storage_error)?;
        if autorun {
            self.clear_autorun()?;
        }
        let bytes = encode(autorun, Utc::now(), image);
        fs::write(self.path(slot), bytes).map_err(storage_error)?;
        debug!("saved {} bytes to slot {}", image.len(), slot);
        Ok(())
    }

    pub fn load(&self, slot: u16) -> Result<SavedProgram> {
        let bytes = match fs::read(self.path(slot)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(no_such_program()),
            Err(e) => return Err(storage_error(e)),
        };
        decode(&bytes)
    }

    /// One row per occupied slot.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut rows = vec![];
        for slot in 0..SAVE_SLOTS {
            if let Ok(saved) = self.load(slot) {
                rows.push(format!(
                    "{} {} BYTES {}{}",
                    slot_name(slot),
                    saved.image.len(),
                    saved.saved.format("%Y-%m-%d %H:%M"),
                    if saved.autorun { " AUTORUN" } else { "" }
                ));
            }
        }
        Ok(rows)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let slot = slot_from_name(name).ok_or_else(no_such_program)?;
        match fs::remove_file(self.path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(no_such_program()),
            Err(e) => Err(storage_error(e)),
        }
    }

    /// The slot to load and run at startup.
    pub fn autorun_slot(&self) -> Option<u16> {
        (0..SAVE_SLOTS).find(|&slot| self.load(slot).map_or(false, |s| s.autorun))
    }

    /// Only one program starts automatically.
    fn clear_autorun(&self) -> Result<()> {
        for slot in 0..SAVE_SLOTS {
            if let Ok(saved) = self.load(slot) {
                if saved.autorun {
                    let bytes = encode(false, saved.saved, &saved.image);
                    fs::write(self.path(slot), bytes).map_err(storage_error)?;
                }
            }
        }
        Ok(())
    }
}

fn encode(autorun: bool, saved: DateTime<Utc>, image: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + image.len());
    bytes.extend_from_slice(MAGIC);
    bytes.push(autorun as u8);
    bytes.extend_from_slice(&saved.timestamp().to_le_bytes());
    bytes.extend_from_slice(&(image.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&checksum_ieee(image).to_le_bytes());
    bytes.extend_from_slice(image);
    bytes
}

fn decode(bytes: &[u8]) -> Result<SavedProgram> {
    let corrupt = || error!(StorageError; "CORRUPT PROGRAM");
    if bytes.len() < HEADER_LEN || &bytes[..4] != MAGIC {
        return Err(corrupt());
    }
    let word = |at: usize| u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
    let mut stamp = [0u8; 8];
    stamp.copy_from_slice(&bytes[5..13]);
    let len = word(13) as usize;
    let crc = word(17);
    let image = &bytes[HEADER_LEN..];
    if image.len() != len || checksum_ieee(image) != crc {
        return Err(corrupt());
    }
    let saved = Utc
        .timestamp_opt(i64::from_le_bytes(stamp), 0)
        .single()
        .ok_or_else(corrupt)?;
    Ok(SavedProgram {
        autorun: bytes[4] != 0,
        saved,
        image: image.to_vec(),
    })
}
