//! Sink implementations

pub mod archive;
pub mod console;
pub mod file;
pub mod rotation;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use rotation::{Clock, RotationKind};

// Re-export the trait next to its implementations.
pub use crate::core::sink::Sink;
