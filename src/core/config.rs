//! Configuration snapshot
//!
//! A `Config` is an immutable snapshot: reconfiguration always installs a
//! whole new snapshot, never a partial merge. Field names mirror the JSON
//! shape consumed by the config-loading layer. Levels and rotation kinds are
//! carried as strings and parsed by the sinks; [`Config::normalized`]
//! guarantees every field parses or has been replaced by its default.

use super::error::ConfigError;
use super::format::DEFAULT_MSG_FORMAT;
use super::level::Level;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Default date-templated path for the file sink, resolved with strftime.
pub const DEFAULT_FILE_FORMAT: &str = "log/%Y%m%d.log";

/// Default bound on the record queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

/// Default number of compressed archives kept on disk.
pub const DEFAULT_MAX_RETAINED: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    // console output
    pub console: bool,
    pub console_level: String,
    pub console_msg_format: String,
    pub console_color: bool,

    // file output
    pub file: bool,
    pub file_level: String,
    pub file_msg_format: String,
    #[serde(rename = "fileNameFormater")]
    pub file_name_format: String,
    pub file_rotate: bool,
    /// Rotate by "daily", "size" or "line".
    pub file_rotate_type: String,
    /// Max compressed archives to retain.
    pub file_max_rotate: usize,
    /// Line count triggering rotation for the "line" kind; 0 disables.
    pub file_max_line: u64,
    /// Byte count triggering rotation for the "size" kind; 0 disables.
    pub file_max_size: u64,
    /// Compress stale rotated files in the background.
    pub file_archive: bool,

    // Accepted as configuration keys, no sink implementation behind them.
    pub email: String,
    pub email_level: String,
    pub remote: String,
    pub remote_level: String,

    pub queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            console: true,
            console_level: Level::Debug.code().to_string(),
            console_msg_format: DEFAULT_MSG_FORMAT.to_string(),
            console_color: true,

            file: false,
            file_level: Level::Info.code().to_string(),
            file_msg_format: DEFAULT_MSG_FORMAT.to_string(),
            file_name_format: DEFAULT_FILE_FORMAT.to_string(),
            file_rotate: true,
            file_rotate_type: "daily".to_string(),
            file_max_rotate: DEFAULT_MAX_RETAINED,
            file_max_line: 0,
            file_max_size: 0,
            file_archive: false,

            email: String::new(),
            email_level: Level::Warn.code().to_string(),
            remote: String::new(),
            remote_level: Level::Warn.code().to_string(),

            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl Config {
    /// Parse a JSON document and normalize it.
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let raw: Config = serde_json::from_str(data)?;
        Ok(raw.normalized())
    }

    /// Read and parse a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json_str(&data)
    }

    /// Produce a snapshot in which every field is valid.
    ///
    /// Invalid or empty values are replaced by their defaults; each
    /// substitution emits a stderr diagnostic but never fails. This is the
    /// only path by which a config reaches the sinks.
    pub fn normalized(&self) -> Self {
        let mut cfg = self.clone();
        let defaults = Config::default();

        cfg.console_level = normalize_level("console", &cfg.console_level);
        if cfg.console_msg_format.trim().is_empty() {
            cfg.console_msg_format = defaults.console_msg_format.clone();
        }

        cfg.file_level = normalize_level("file", &cfg.file_level);
        if cfg.file_msg_format.trim().is_empty() {
            cfg.file_msg_format = defaults.file_msg_format.clone();
        }
        if cfg.file_name_format.trim().is_empty() {
            cfg.file_name_format = defaults.file_name_format.clone();
        }
        if !matches!(cfg.file_rotate_type.as_str(), "daily" | "size" | "line") {
            eprintln!(
                "[fanlog] unsupported rotation type '{}', using daily",
                cfg.file_rotate_type
            );
            cfg.file_rotate_type = "daily".to_string();
        }
        if cfg.file_max_rotate == 0 {
            cfg.file_max_rotate = DEFAULT_MAX_RETAINED;
        }

        cfg.email_level = normalize_level("email", &cfg.email_level);
        cfg.remote_level = normalize_level("remote", &cfg.remote_level);

        if cfg.queue_capacity == 0 {
            cfg.queue_capacity = DEFAULT_QUEUE_CAPACITY;
        }

        cfg
    }

    /// Parse a per-sink level field, assuming a normalized snapshot.
    pub fn parse_level(sink: &'static str, value: &str) -> Result<Level, ConfigError> {
        Level::from_str(value).map_err(|_| ConfigError::UnknownLevel {
            sink: sink.to_string(),
            value: value.to_string(),
        })
    }
}

fn normalize_level(sink: &str, value: &str) -> String {
    match Level::from_str(value) {
        Ok(level) => level.code().to_string(),
        Err(_) => {
            eprintln!("[fanlog] unsupported level for {}: '{}', using WARN", sink, value);
            Level::Warn.code().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert!(cfg.console);
        assert!(!cfg.file);
        assert_eq!(cfg.console_level, "DEBU");
        assert_eq!(cfg.file_level, "INFO");
        assert_eq!(cfg.file_name_format, DEFAULT_FILE_FORMAT);
        assert_eq!(cfg.file_rotate_type, "daily");
        assert_eq!(cfg.file_max_rotate, DEFAULT_MAX_RETAINED);
        assert_eq!(cfg.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    }

    #[test]
    fn test_empty_json_is_defaults() {
        let cfg = Config::from_json_str("{}").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_json_field_names() {
        let cfg = Config::from_json_str(
            r#"{
                "console": false,
                "consoleLevel": "WARN",
                "fileLevel": "ERRO",
                "fileNameFormater": "log/app-%Y%m%d.log",
                "fileRotateType": "size",
                "fileMaxRotate": 5
            }"#,
        )
        .unwrap();
        assert!(!cfg.console);
        assert_eq!(cfg.console_level, "WARN");
        assert_eq!(cfg.file_level, "ERRO");
        assert_eq!(cfg.file_name_format, "log/app-%Y%m%d.log");
        assert_eq!(cfg.file_rotate_type, "size");
        assert_eq!(cfg.file_max_rotate, 5);
    }

    #[test]
    fn test_unknown_level_defaults_to_warn() {
        let cfg = Config::from_json_str(r#"{"fileLevel": "verbose"}"#).unwrap();
        assert_eq!(cfg.file_level, "WARN");
    }

    #[test]
    fn test_empty_templates_fall_back() {
        let cfg = Config::from_json_str(
            r#"{"consoleMsgFormat": "  ", "fileMsgFormat": "", "fileNameFormater": ""}"#,
        )
        .unwrap();
        assert_eq!(cfg.console_msg_format, DEFAULT_MSG_FORMAT);
        assert_eq!(cfg.file_msg_format, DEFAULT_MSG_FORMAT);
        assert_eq!(cfg.file_name_format, DEFAULT_FILE_FORMAT);
    }

    #[test]
    fn test_unknown_rotation_defaults_to_daily() {
        let cfg = Config::from_json_str(r#"{"fileRotateType": "weekly"}"#).unwrap();
        assert_eq!(cfg.file_rotate_type, "daily");
    }

    #[test]
    fn test_zero_max_rotate_defaults() {
        let cfg = Config::from_json_str(r#"{"fileMaxRotate": 0}"#).unwrap();
        assert_eq!(cfg.file_max_rotate, DEFAULT_MAX_RETAINED);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Config::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
