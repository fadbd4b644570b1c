//! Log level threshold
//!
//! `logging.level` picks the least severe line that still gets written.
//! Access log lines are governed by `logging.access_log` instead.

use std::io;
use std::str::FromStr;
use std::sync::OnceLock;

static MAX_LEVEL: OnceLock<Level> = OnceLock::new();

/// Severity of a log line, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    /// Whether a line at this level passes the `max` threshold
    pub fn allowed_under(self, max: Self) -> bool {
        self <= max
    }
}

impl FromStr for Level {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" | "trace" => Ok(Self::Debug),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Unknown log level '{other}' (expected error, warn, info or debug)"),
            )),
        }
    }
}

/// Set the global threshold; later calls keep the first value
pub fn init(level: Level) {
    MAX_LEVEL.get_or_init(|| level);
}

/// Current threshold, `Info` before `init()`
pub fn max_level() -> Level {
    MAX_LEVEL.get().copied().unwrap_or(Level::Info)
}

pub fn enabled(level: Level) -> bool {
    level.allowed_under(max_level())
}
