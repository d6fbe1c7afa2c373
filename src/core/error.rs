//! Error types for the logging pipeline
//!
//! Three taxonomies, matching the seams they surface at: configuration,
//! rotation, and sink writes. None of them is ever fatal to the process;
//! the worst case is counted loss of a bounded set of records.

/// Configuration problem.
///
/// Recovered locally: normalization substitutes a default for the offending
/// field, or a failed reload leaves the previous snapshot in place.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported level '{value}' for {sink}")]
    UnknownLevel { sink: String, value: String },

    #[error("unsupported rotation type '{0}'")]
    UnknownRotation(String),

    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Rotation failure on a file sink.
///
/// The sink keeps its previous handle when that handle is still usable,
/// otherwise it degrades until a later rotation attempt succeeds.
#[derive(Debug, thiserror::Error)]
pub enum RotationError {
    #[error("failed to create log directory '{path}': {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file '{path}': {source}")]
    OpenFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move full log file '{path}' aside: {source}")]
    Backup {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Write failure on a sink.
///
/// Surfaced to the dispatcher's diagnostic channel and counted; never
/// propagated back to the caller that emitted the record.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("sink '{0}' is closed")]
    SinkClosed(&'static str),

    /// The file sink has no usable handle after a failed rotation.
    #[error("sink '{0}' is degraded, waiting for a successful rotation")]
    Degraded(&'static str),

    #[error("I/O error while {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Rotation(#[from] RotationError),
}

impl WriteError {
    pub fn io(operation: &'static str, source: std::io::Error) -> Self {
        WriteError::Io { operation, source }
    }
}
