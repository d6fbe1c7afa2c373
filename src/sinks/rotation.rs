//! Rotation kinds and log-file name resolution

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Time source for name resolution, injectable so tests can cross midnight.
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// When the file sink switches its active output file.
///
/// Daily rotation resolves a strftime name pattern against the clock; size
/// and line rotation keep a static name and move the full file aside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationKind {
    #[default]
    Daily,
    Size,
    Line,
}

impl FromStr for RotationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(RotationKind::Daily),
            "size" => Ok(RotationKind::Size),
            "line" => Ok(RotationKind::Line),
            _ => Err(format!("unsupported rotation type: '{}'", s)),
        }
    }
}

/// Resolve the active file name for a pattern at the given instant.
pub fn resolve_path(pattern: &str, kind: RotationKind, now: DateTime<Local>) -> PathBuf {
    match kind {
        RotationKind::Daily => PathBuf::from(now.format(pattern).to_string()),
        RotationKind::Size | RotationKind::Line => PathBuf::from(pattern),
    }
}

/// Sibling name a full static-named file is moved to before reopening.
pub fn backup_path(active: &Path, now: DateTime<Local>) -> PathBuf {
    let name = active
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("log");
    active.with_file_name(format!("{}.{}", name, now.format("%Y%m%d-%H%M%S")))
}
