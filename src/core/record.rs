//! Log record and message part types

use super::level::Level;
use chrono::{DateTime, Local};
use std::fmt;
use std::panic::Location;
use std::path::Path;

/// One value in a record's message.
///
/// A closed set of variants instead of an open "any" type; the formatter
/// renders each via its canonical `Display` form.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Str(s) => write!(f, "{}", s),
            Part::Int(i) => write!(f, "{}", i),
            Part::Uint(u) => write!(f, "{}", u),
            Part::Float(x) => write!(f, "{}", x),
            Part::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for Part {
    fn from(s: String) -> Self {
        Part::Str(s)
    }
}

impl From<&str> for Part {
    fn from(s: &str) -> Self {
        Part::Str(s.to_string())
    }
}

impl From<i64> for Part {
    fn from(i: i64) -> Self {
        Part::Int(i)
    }
}

impl From<i32> for Part {
    fn from(i: i32) -> Self {
        Part::Int(i64::from(i))
    }
}

impl From<u64> for Part {
    fn from(u: u64) -> Self {
        Part::Uint(u)
    }
}

impl From<u32> for Part {
    fn from(u: u32) -> Self {
        Part::Uint(u64::from(u))
    }
}

impl From<usize> for Part {
    fn from(u: usize) -> Self {
        Part::Uint(u as u64)
    }
}

impl From<f64> for Part {
    fn from(x: f64) -> Self {
        Part::Float(x)
    }
}

impl From<f32> for Part {
    fn from(x: f32) -> Self {
        Part::Float(f64::from(x))
    }
}

impl From<bool> for Part {
    fn from(b: bool) -> Self {
        Part::Bool(b)
    }
}

/// One structured log event prior to formatting.
///
/// Constructed at the emit call site, pushed onto the queue, read once by the
/// dispatcher during fan-out, then discarded.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub time: DateTime<Local>,
    pub level: Level,
    pub parts: Vec<Part>,
    /// Source file of the emit call, as reported by the compiler.
    pub file: &'static str,
    pub line: u32,
}

impl LogRecord {
    /// Build a record stamped with the caller's source location.
    ///
    /// `#[track_caller]` propagates through the public emit methods, so the
    /// location is the application call site, not a frame inside this crate.
    #[track_caller]
    pub fn new(level: Level, parts: Vec<Part>) -> Self {
        let loc = Location::caller();
        Self {
            time: Local::now(),
            level,
            parts,
            file: loc.file(),
            line: loc.line(),
        }
    }

    /// Base name of the source file, without directories.
    pub fn file_name(&self) -> &str {
        Path::new(self.file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(self.file)
    }

    /// Message parts joined by single spaces.
    pub fn message(&self) -> String {
        let rendered: Vec<String> = self.parts.iter().map(ToString::to_string).collect();
        rendered.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_display() {
        assert_eq!(Part::from("hello").to_string(), "hello");
        assert_eq!(Part::from(1).to_string(), "1");
        assert_eq!(Part::from(-7i64).to_string(), "-7");
        assert_eq!(Part::from(2.5).to_string(), "2.5");
        assert_eq!(Part::from(true).to_string(), "true");
    }

    #[test]
    fn test_message_joins_with_spaces() {
        let record = LogRecord::new(
            Level::Info,
            vec![Part::from("hello"), Part::from(1), Part::from(true)],
        );
        assert_eq!(record.message(), "hello 1 true");
    }

    #[test]
    fn test_caller_location_captured() {
        let record = LogRecord::new(Level::Debug, vec![]);
        assert!(record.file.ends_with("record.rs"));
        assert!(record.line > 0);
        assert_eq!(record.file_name(), "record.rs");
    }
}
