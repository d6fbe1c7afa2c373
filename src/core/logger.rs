//! Logger handle
//!
//! One `Logger` owns the whole pipeline: the bounded record queue, the
//! control channel, the sink registry, the current config snapshot and the
//! dispatcher thread. Nothing here is process-global; `crate::global` layers
//! a default instance on top for callers that want free functions.

use super::config::Config;
use super::dispatcher::{self, Control};
use super::level::Level;
use super::metrics::LogMetrics;
use super::record::{LogRecord, Part};
use super::registry::SinkRegistry;
use super::sink::Sink;
use crate::sinks::{ConsoleSink, FileSink};
use crossbeam_channel::{bounded, unbounded, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Bound on how long flush and close wait for the dispatcher's ack.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Logger {
    sender: Sender<LogRecord>,
    control: Sender<Control>,
    registry: Arc<Mutex<SinkRegistry>>,
    config: RwLock<Config>,
    metrics: Arc<LogMetrics>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    closed: AtomicBool,
}

impl Logger {
    /// Start a logger with the built-in defaults (console sink only).
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Start a logger for a configuration snapshot.
    ///
    /// The snapshot is normalized first, so invalid fields degrade to their
    /// defaults instead of failing.
    pub fn with_config(cfg: Config) -> Self {
        Self::start(cfg.normalized(), Vec::new())
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn start(cfg: Config, extra_sinks: Vec<Box<dyn Sink>>) -> Self {
        let mut sinks = build_sinks(&cfg);
        sinks.extend(extra_sinks);

        let registry = Arc::new(Mutex::new(SinkRegistry::new(sinks)));
        let metrics = Arc::new(LogMetrics::new());
        let (sender, receiver) = bounded(cfg.queue_capacity);
        let (control, control_rx) = unbounded();

        let registry_clone = Arc::clone(&registry);
        let metrics_clone = Arc::clone(&metrics);
        let worker = thread::spawn(move || {
            dispatcher::run(receiver, control_rx, registry_clone, metrics_clone);
        });

        Self {
            sender,
            control,
            registry,
            config: RwLock::new(cfg),
            metrics,
            worker: Mutex::new(Some(worker)),
            closed: AtomicBool::new(false),
        }
    }

    /// Enqueue one record.
    ///
    /// Non-blocking from the caller's view except under backpressure: when
    /// the queue is full the call waits for the dispatcher to free space
    /// (counted in `metrics().blocked()`). After `close` the record is
    /// rejected immediately and counted instead.
    #[track_caller]
    pub fn log(&self, level: Level, parts: Vec<Part>) {
        self.send(LogRecord::new(level, parts));
    }

    #[track_caller]
    pub fn debug(&self, parts: Vec<Part>) {
        self.send(LogRecord::new(Level::Debug, parts));
    }

    #[track_caller]
    pub fn info(&self, parts: Vec<Part>) {
        self.send(LogRecord::new(Level::Info, parts));
    }

    #[track_caller]
    pub fn warn(&self, parts: Vec<Part>) {
        self.send(LogRecord::new(Level::Warn, parts));
    }

    #[track_caller]
    pub fn error(&self, parts: Vec<Part>) {
        self.send(LogRecord::new(Level::Error, parts));
    }

    #[track_caller]
    pub fn fatal(&self, parts: Vec<Part>) {
        self.send(LogRecord::new(Level::Fatal, parts));
    }

    fn send(&self, record: LogRecord) {
        if self.closed.load(Ordering::Acquire) {
            if self.metrics.record_rejected() == 0 {
                eprintln!("[fanlog] logger is closed, discarding new records");
            }
            return;
        }

        match self.sender.try_send(record) {
            Ok(()) => {
                self.metrics.record_enqueued();
            }
            Err(TrySendError::Full(record)) => {
                // Backpressure: wait for the dispatcher rather than dropping.
                self.metrics.record_blocked();
                if self.sender.send(record).is_ok() {
                    self.metrics.record_enqueued();
                } else {
                    self.metrics.record_rejected();
                }
            }
            Err(TrySendError::Disconnected(_)) => {
                self.metrics.record_rejected();
            }
        }
    }

    /// Block until everything enqueued so far is written and every sink is
    /// flushed. Returns false if the logger is closed or the dispatcher did
    /// not ack within [`DEFAULT_SHUTDOWN_TIMEOUT`].
    pub fn flush(&self) -> bool {
        if self.closed.load(Ordering::Acquire) {
            return false;
        }
        let (ack_tx, ack_rx) = bounded(1);
        if self.control.send(Control::Flush(ack_tx)).is_err() {
            return false;
        }
        ack_rx.recv_timeout(DEFAULT_SHUTDOWN_TIMEOUT).is_ok()
    }

    /// Stop the pipeline: deliver everything already enqueued, flush and
    /// close every sink, and terminate the dispatcher. Idempotent; emits
    /// arriving afterwards are rejected. The dispatcher never restarts.
    pub fn close(&self) -> bool {
        self.close_with_timeout(DEFAULT_SHUTDOWN_TIMEOUT)
    }

    pub fn close_with_timeout(&self, timeout: Duration) -> bool {
        if self.closed.swap(true, Ordering::AcqRel) {
            return true;
        }

        let (ack_tx, ack_rx) = bounded(1);
        if self.control.send(Control::Shutdown(ack_tx)).is_err() {
            return false;
        }
        let acked = ack_rx.recv_timeout(timeout).is_ok();

        if let Some(handle) = self.worker.lock().take() {
            if acked {
                if handle.join().is_err() {
                    eprintln!("[fanlog] dispatcher thread panicked during shutdown");
                    return false;
                }
            } else {
                eprintln!(
                    "[fanlog] dispatcher did not stop within {:?}, records may be lost",
                    timeout
                );
                return false;
            }
        }
        acked
    }

    /// Replace the whole configuration snapshot.
    ///
    /// A fresh sink set is built and swapped in under the registry lock, so
    /// no record is fanned out to a half-replaced set; old sinks are closed
    /// by the swap.
    pub fn reconfigure(&self, cfg: Config) {
        let cfg = cfg.normalized();
        let sinks = build_sinks(&cfg);
        self.registry.lock().replace_all(sinks);
        *self.config.write() = cfg;
    }

    pub fn set_console_level(&self, level: Level) {
        let mut cfg = self.config.read().clone();
        cfg.console_level = level.code().to_string();
        self.reconfigure(cfg);
    }

    pub fn set_file_level(&self, level: Level) {
        let mut cfg = self.config.read().clone();
        cfg.file_level = level.code().to_string();
        self.reconfigure(cfg);
    }

    pub fn set_file_enabled(&self, enabled: bool) {
        let mut cfg = self.config.read().clone();
        cfg.file = enabled;
        self.reconfigure(cfg);
    }

    pub fn set_archival(&self, enabled: bool) {
        let mut cfg = self.config.read().clone();
        cfg.file_archive = enabled;
        self.reconfigure(cfg);
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    pub fn metrics(&self) -> &LogMetrics {
        &self.metrics
    }

    /// Names of the currently active sinks.
    pub fn sink_names(&self) -> Vec<&'static str> {
        self.registry.lock().sink_names()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close_with_timeout(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

/// Build the sink set a config snapshot asks for.
///
/// "email" and "remote" are accepted configuration keys with no sink behind
/// them; enabling them is a no-op.
fn build_sinks(cfg: &Config) -> Vec<Box<dyn Sink>> {
    let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
    if cfg.console {
        match ConsoleSink::from_config(cfg) {
            Ok(sink) => sinks.push(Box::new(sink)),
            Err(e) => eprintln!("[fanlog] cannot build console sink: {}", e),
        }
    }
    if cfg.file {
        match FileSink::from_config(cfg) {
            Ok(sink) => sinks.push(Box::new(sink)),
            Err(e) => eprintln!("[fanlog] cannot build file sink: {}", e),
        }
    }
    sinks
}

/// Fluent construction for a [`Logger`].
pub struct LoggerBuilder {
    config: Config,
    extra_sinks: Vec<Box<dyn Sink>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            extra_sinks: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, cfg: Config) -> Self {
        self.config = cfg;
        self
    }

    /// Install an additional sink beside the configured ones.
    ///
    /// Extra sinks are part of the initial set only; a later `reconfigure`
    /// replaces them like everything else.
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.extra_sinks.push(Box::new(sink));
        self
    }

    pub fn build(self) -> Logger {
        Logger::start(self.config.normalized(), self.extra_sinks)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
