use crate::mach::MAX_ARENA;
use log::Level;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MEMORY: usize = 4096;
pub const MIN_MEMORY: usize = 256;
pub const DEFAULT_SLOTS: &str = "basic_slots";

/// Settings read from the environment at startup.
///
/// * `BASIC_MEMORY` arena size in bytes
/// * `BASIC_SLOTS` directory holding saved programs
/// * `BASIC_LOG` log level, logging is off when unset
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub memory: usize,
    pub slots: PathBuf,
    pub log_level: Option<Level>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            memory: DEFAULT_MEMORY,
            slots: PathBuf::from(DEFAULT_SLOTS),
            log_level: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Config {
        Config::from_vars(
            env::var("BASIC_MEMORY").ok().as_deref(),
            env::var("BASIC_SLOTS").ok().as_deref(),
            env::var("BASIC_LOG").ok().as_deref(),
        )
    }

    pub fn from_vars(memory: Option<&str>, slots: Option<&str>, log: Option<&str>) -> Config {
        let mut config = Config::default();
        if let Some(Ok(memory)) = memory.map(|m| m.trim().parse::<usize>()) {
            config.memory = memory.clamp(MIN_MEMORY, MAX_ARENA);
        }
        if let Some(slots) = slots.filter(|s| !s.trim().is_empty()) {
            config.slots = PathBuf::from(slots);
        }
        config.log_level = log.and_then(|l| l.trim().parse::<Level>().ok());
        config
    }

    /// Starts stderr logging when a level was asked for.
    pub fn init_logging(&self) {
        if let Some(level) = self.log_level {
            if let Err(error) = simple_logger::init_with_level(level) {
                eprintln!("{}", error);
            }
        }
    }
}
