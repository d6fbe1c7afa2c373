//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record.
///
/// The ordering drives both per-sink filtering and console coloring, and the
/// table length is fixed: sinks index color and code lookups by variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Level {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl Level {
    /// Canonical four-letter code used in rendered output.
    pub fn code(&self) -> &'static str {
        match self {
            Level::Debug => "DEBU",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERRO",
            Level::Fatal => "FATA",
        }
    }

    /// Console color for records at this level.
    pub fn color(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Debug => White,
            Level::Info => Blue,
            Level::Warn => Yellow,
            Level::Error => Red,
            Level::Fatal => Magenta,
        }
    }

    /// All levels, lowest first.
    pub const fn all() -> [Level; 5] {
        [Level::Debug, Level::Info, Level::Warn, Level::Error, Level::Fatal]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBU" | "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERRO" | "ERROR" => Ok(Level::Error),
            "FATA" | "FATAL" | "CRITICAL" => Ok(Level::Fatal),
            _ => Err(format!("unsupported level: '{}'", s)),
        }
    }
}
