//! Sink capability interface

use super::config::Config;
use super::error::{ConfigError, WriteError};
use super::record::LogRecord;

/// An output destination for rendered log lines.
///
/// Each sink owns one target, applies its own level filter inside `handle`,
/// and renders records through its own message template. `close` must be
/// idempotent; `handle` after `close` returns [`WriteError::SinkClosed`]
/// rather than panicking.
pub trait Sink: Send {
    fn name(&self) -> &'static str;

    /// Apply a validated configuration snapshot to this sink.
    fn configure(&mut self, cfg: &Config) -> Result<(), ConfigError>;

    /// Deliver one record. Records below the sink's minimum level return
    /// `Ok(())` without doing any work.
    fn handle(&mut self, record: &LogRecord) -> Result<(), WriteError>;

    fn flush(&mut self) -> Result<(), WriteError>;

    /// Release the underlying resource.
    fn close(&mut self) -> Result<(), WriteError>;
}
