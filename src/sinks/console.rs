//! Console sink implementation

use crate::core::config::Config;
use crate::core::error::{ConfigError, WriteError};
use crate::core::format;
use crate::core::level::Level;
use crate::core::record::LogRecord;
use crate::core::sink::Sink;
use colored::Colorize;
use std::io::Write;

/// Writes rendered lines to standard output, optionally colored by level.
///
/// Lines are written through a locked stdout handle so concurrent process
/// output cannot split a log line. Platform ANSI support is handled by the
/// `colored` crate; on consoles without it the escapes are suppressed.
pub struct ConsoleSink {
    level: Level,
    template: String,
    color: bool,
    closed: bool,
}

impl ConsoleSink {
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let mut sink = Self {
            level: Level::Debug,
            template: format::DEFAULT_MSG_FORMAT.to_string(),
            color: true,
            closed: false,
        };
        sink.configure(cfg)?;
        Ok(sink)
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn configure(&mut self, cfg: &Config) -> Result<(), ConfigError> {
        self.level = Config::parse_level("console", &cfg.console_level)?;
        self.template = cfg.console_msg_format.clone();
        self.color = cfg.console_color;
        Ok(())
    }

    fn handle(&mut self, record: &LogRecord) -> Result<(), WriteError> {
        if self.closed {
            return Err(WriteError::SinkClosed(self.name()));
        }
        if record.level < self.level {
            return Ok(());
        }

        let rendered = format::render(&self.template, record);
        let line = if self.color {
            let body = rendered.trim_end_matches('\n');
            format!("{}\n", body.color(record.level.color()))
        } else {
            rendered
        };

        let mut out = std::io::stdout().lock();
        out.write_all(line.as_bytes())
            .map_err(|e| WriteError::io("writing to stdout", e))
    }

    fn flush(&mut self) -> Result<(), WriteError> {
        std::io::stdout()
            .flush()
            .map_err(|e| WriteError::io("flushing stdout", e))
    }

    fn close(&mut self) -> Result<(), WriteError> {
        // stdout is not ours to close; the flag makes close idempotent and
        // later handle calls fail with SinkClosed.
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        std::io::stdout()
            .flush()
            .map_err(|e| WriteError::io("flushing stdout", e))
    }
}
