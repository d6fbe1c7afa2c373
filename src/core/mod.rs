//! Core pipeline types and traits

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod registry;
pub mod sink;

pub use config::Config;
pub use dispatcher::Control;
pub use error::{ConfigError, RotationError, WriteError};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LogMetrics;
pub use record::{LogRecord, Part};
pub use registry::SinkRegistry;
pub use sink::Sink;
