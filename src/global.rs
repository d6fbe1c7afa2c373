//! Process-wide default logger
//!
//! Convenience wrappers over one lazily created [`Logger`]. The core
//! pipeline never requires this module; everything here delegates to a
//! regular handle that callers could just as well own themselves.

use crate::core::config::Config;
use crate::core::error::ConfigError;
use crate::core::level::Level;
use crate::core::logger::Logger;
use crate::core::record::Part;
use std::path::Path;
use std::sync::OnceLock;

static DEFAULT: OnceLock<Logger> = OnceLock::new();

/// Install the default logger from a configuration snapshot.
///
/// Returns false when a default logger already exists; the existing one
/// keeps running and the snapshot is discarded.
pub fn init(cfg: Config) -> bool {
    DEFAULT.set(Logger::with_config(cfg)).is_ok()
}

/// Install the default logger from a JSON config file.
pub fn init_from_file(path: impl AsRef<Path>) -> Result<bool, ConfigError> {
    let cfg = Config::from_file(path)?;
    Ok(init(cfg))
}

/// The default logger, created with built-in defaults on first use.
pub fn default_logger() -> &'static Logger {
    DEFAULT.get_or_init(Logger::new)
}

#[track_caller]
pub fn log(level: Level, parts: Vec<Part>) {
    default_logger().log(level, parts);
}

#[track_caller]
pub fn debug(parts: Vec<Part>) {
    default_logger().debug(parts);
}

#[track_caller]
pub fn info(parts: Vec<Part>) {
    default_logger().info(parts);
}

#[track_caller]
pub fn warn(parts: Vec<Part>) {
    default_logger().warn(parts);
}

#[track_caller]
pub fn error(parts: Vec<Part>) {
    default_logger().error(parts);
}

#[track_caller]
pub fn fatal(parts: Vec<Part>) {
    default_logger().fatal(parts);
}

/// Flush the default logger; see [`Logger::flush`].
pub fn flush() -> bool {
    default_logger().flush()
}

/// Close the default logger; see [`Logger::close`].
pub fn close() -> bool {
    default_logger().close()
}

pub fn reconfigure(cfg: Config) {
    default_logger().reconfigure(cfg);
}

pub fn set_console_level(level: Level) {
    default_logger().set_console_level(level);
}

pub fn set_file_level(level: Level) {
    default_logger().set_file_level(level);
}

pub fn set_file_enabled(enabled: bool) {
    default_logger().set_file_enabled(enabled);
}

pub fn set_archival(enabled: bool) {
    default_logger().set_archival(enabled);
}
