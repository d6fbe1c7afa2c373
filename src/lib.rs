//! # fanlog
//!
//! Asynchronous fan-out logging with console and daily-rotating file sinks.
//!
//! Callers enqueue leveled records onto a bounded queue; a single background
//! worker drains it and delivers each record to every active sink, so emit
//! calls never wait on slow I/O. The file sink rotates daily (or by size or
//! line count) and can archive stale files to gzip in the background.
//!
//! ## Features
//!
//! - **Non-blocking emits**: a bounded queue decouples callers from sink I/O;
//!   backpressure only when the queue is full
//! - **Fan-out**: console and file sinks with independent level filters and
//!   message templates
//! - **Daily rotation** with background gzip archival and retention pruning
//! - **Hot reconfiguration**: swap the whole sink set atomically at runtime
//!
//! ## Example
//!
//! ```
//! use fanlog::prelude::*;
//! use fanlog::{info, infof};
//!
//! let logger = Logger::new();
//! info!(logger, "server started on port", 8080);
//! infof!(logger, "{} workers ready", 4);
//! logger.flush();
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Config, ConfigError, Control, Level, LogMetrics, LogRecord, Logger, LoggerBuilder, Part,
        RotationError, Sink, SinkRegistry, WriteError, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, RotationKind};
}

pub use crate::core::{
    Config, ConfigError, Control, Level, LogMetrics, LogRecord, Logger, LoggerBuilder, Part,
    RotationError, Sink, SinkRegistry, WriteError, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use crate::core::format::{render, DEFAULT_MSG_FORMAT};
pub use crate::sinks::{Clock, ConsoleSink, FileSink, RotationKind};
