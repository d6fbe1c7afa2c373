//! File sink with embedded rotation
//!
//! Owns exactly one open file handle at a time. Before every write the sink
//! re-resolves the name its rotation policy points at; when that differs from
//! the open file, or the open file has vanished from disk, rotation runs
//! under the per-sink lock so no write can proceed mid-swap.

use crate::core::config::Config;
use crate::core::error::{ConfigError, RotationError, WriteError};
use crate::core::format;
use crate::core::level::Level;
use crate::core::record::LogRecord;
use crate::core::sink::Sink;
use crate::sinks::archive;
use crate::sinks::rotation::{self, Clock, RotationKind};
use chrono::Local;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Mutable sink state, guarded so rotation and writes exclude each other.
struct FileState {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    bytes: u64,
    lines: u64,
}

pub struct FileSink {
    level: Level,
    template: String,
    pattern: String,
    kind: RotationKind,
    rotate: bool,
    max_bytes: u64,
    max_lines: u64,
    archive: bool,
    max_retained: usize,
    clock: Clock,
    closed: bool,
    state: Mutex<FileState>,
}

impl FileSink {
    /// Build a sink from a validated config snapshot.
    ///
    /// The file is not opened here; the first write finds no handle, which
    /// counts as rotation due, and the regular rotation path opens it.
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let mut sink = Self {
            level: Level::Info,
            template: format::DEFAULT_MSG_FORMAT.to_string(),
            pattern: String::new(),
            kind: RotationKind::Daily,
            rotate: true,
            max_bytes: 0,
            max_lines: 0,
            archive: false,
            max_retained: 0,
            clock: Arc::new(Local::now),
            closed: false,
            state: Mutex::new(FileState {
                writer: None,
                path: PathBuf::new(),
                bytes: 0,
                lines: 0,
            }),
        };
        sink.configure(cfg)?;
        Ok(sink)
    }

    /// Replace the time source. Tests use this to cross rotation boundaries.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Path of the currently open file.
    pub fn active_path(&self) -> PathBuf {
        self.state.lock().path.clone()
    }

    fn rotation_due(&self, state: &FileState) -> bool {
        if state.writer.is_none() {
            return true;
        }
        // The open file disappearing from disk always forces a reopen.
        if !state.path.exists() {
            return true;
        }
        if !self.rotate {
            return false;
        }
        match self.kind {
            RotationKind::Daily => {
                rotation::resolve_path(&self.pattern, self.kind, (self.clock)()) != state.path
            }
            RotationKind::Size => self.max_bytes > 0 && state.bytes >= self.max_bytes,
            RotationKind::Line => self.max_lines > 0 && state.lines >= self.max_lines,
        }
    }

    /// Swap the active file to whatever the policy currently resolves to.
    ///
    /// For daily rotation the previous handle stays open until the new file
    /// is ready, so an open failure leaves the sink writing to the old day.
    /// Static-named rotation has to close first to move the full file aside;
    /// a failure there leaves the sink degraded until a later attempt.
    fn rotate(&self, state: &mut FileState) -> Result<(), RotationError> {
        let now = (self.clock)();
        let new_path = rotation::resolve_path(&self.pattern, self.kind, now);

        if new_path == state.path && state.writer.is_some() && state.path.exists() {
            if let Some(mut old) = state.writer.take() {
                let _ = old.flush();
            }
            let backup = rotation::backup_path(&state.path, now);
            fs::rename(&state.path, &backup).map_err(|e| RotationError::Backup {
                path: state.path.display().to_string(),
                source: e,
            })?;
        }

        if let Some(parent) = new_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| RotationError::CreateDir {
                    path: parent.display().to_string(),
                    source: e,
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&new_path)
            .map_err(|e| RotationError::OpenFile {
                path: new_path.display().to_string(),
                source: e,
            })?;
        let bytes = file.metadata().map(|m| m.len()).unwrap_or(0);

        if let Some(mut old) = state.writer.take() {
            let _ = old.flush();
        }
        state.writer = Some(BufWriter::new(file));
        state.path = new_path;
        state.bytes = bytes;
        state.lines = 0;
        Ok(())
    }

    fn log_suffix(&self) -> String {
        Path::new(&self.pattern)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("log")
            .to_string()
    }
}

impl Sink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn configure(&mut self, cfg: &Config) -> Result<(), ConfigError> {
        self.level = Config::parse_level("file", &cfg.file_level)?;
        self.kind = cfg
            .file_rotate_type
            .parse()
            .map_err(|_| ConfigError::UnknownRotation(cfg.file_rotate_type.clone()))?;
        self.template = cfg.file_msg_format.clone();
        self.pattern = cfg.file_name_format.clone();
        self.rotate = cfg.file_rotate;
        self.max_bytes = cfg.file_max_size;
        self.max_lines = cfg.file_max_line;
        self.archive = cfg.file_archive;
        self.max_retained = cfg.file_max_rotate;
        Ok(())
    }

    fn handle(&mut self, record: &LogRecord) -> Result<(), WriteError> {
        if self.closed {
            return Err(WriteError::SinkClosed(self.name()));
        }
        if record.level < self.level {
            return Ok(());
        }

        let line = format::render(&self.template, record);
        let mut state = self.state.lock();

        if self.rotation_due(&state) {
            let had_open = state.writer.is_some();
            match self.rotate(&mut state) {
                Ok(()) => {
                    if self.archive && had_open {
                        if let Some(dir) = state.path.parent() {
                            archive::spawn(
                                dir.to_path_buf(),
                                state.path.clone(),
                                self.log_suffix(),
                                self.max_retained,
                            );
                        }
                    }
                }
                Err(e) => {
                    // The record below still goes to the previous handle when
                    // that handle survived; otherwise the sink is degraded.
                    eprintln!("[fanlog] rotation failed for '{}': {}", self.pattern, e);
                }
            }
        }

        let writer = state
            .writer
            .as_mut()
            .ok_or(WriteError::Degraded(self.name()))?;
        writer
            .write_all(line.as_bytes())
            .map_err(|e| WriteError::io("writing log record", e))?;
        state.bytes += line.len() as u64;
        state.lines += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), WriteError> {
        let mut state = self.state.lock();
        if let Some(writer) = state.writer.as_mut() {
            writer
                .flush()
                .map_err(|e| WriteError::io("flushing log file", e))?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), WriteError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let mut state = self.state.lock();
        if let Some(mut writer) = state.writer.take() {
            writer
                .flush()
                .map_err(|e| WriteError::io("flushing log file", e))?;
        }
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if let Some(mut writer) = state.writer.take() {
            let _ = writer.flush();
        }
    }
}
