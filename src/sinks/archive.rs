//! Background archival of stale rotated log files
//!
//! Runs after a successful rotation, off the dispatcher thread: stale log
//! files are gzip-compressed in place and the originals removed, then the
//! archive count is pruned to the retention limit. Every per-file failure is
//! skipped so one unreadable candidate never aborts the scan.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

/// Extension appended to compressed archives.
pub const ARCHIVE_EXT: &str = "gz";

/// Age a rotated file must reach before it is archived.
pub const MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Spawn the archival pass on its own thread.
///
/// Never blocks the caller; at most one task per rotation event.
pub fn spawn(dir: PathBuf, active: PathBuf, suffix: String, max_retained: usize) {
    thread::spawn(move || {
        archive_stale(&dir, &active, &suffix, MAX_AGE, max_retained);
    });
}

/// Compress every stale log file in `dir`, then prune old archives.
///
/// A file is a candidate when it carries the log `suffix`, is not the
/// `active` file, and its modification time is older than `max_age`.
pub fn archive_stale(dir: &Path, active: &Path, suffix: &str, max_age: Duration, max_retained: usize) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("[fanlog] cannot scan log directory '{}': {}", dir.display(), e);
            return;
        }
    };

    let now = SystemTime::now();
    for entry in entries.flatten() {
        let path = entry.path();
        if path == active || !has_suffix(&path, suffix) {
            continue;
        }
        let stale = entry
            .metadata()
            .ok()
            .filter(|m| m.is_file())
            .and_then(|m| m.modified().ok())
            .and_then(|modified| now.duration_since(modified).ok())
            .is_some_and(|age| age >= max_age);
        if !stale {
            continue;
        }
        if let Err(e) = compress_one(&path) {
            eprintln!("[fanlog] skipping archival of '{}': {}", path.display(), e);
        }
    }

    prune_archives(dir, max_retained);
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(suffix)
}

/// Stream-compress one file to a `.gz` sibling.
///
/// The archive is written to a temporary name and renamed into place; the
/// original is deleted only after the archive is fully on disk, so a failure
/// at any step leaves the original intact.
fn compress_one(path: &Path) -> io::Result<()> {
    let gz_path = archived_name(path);
    let tmp_path = gz_path.with_extension(format!("{}.tmp", ARCHIVE_EXT));

    let input = File::open(path)?;
    let mut reader = BufReader::new(input);

    let output = File::create(&tmp_path)?;
    let mut encoder = GzEncoder::new(BufWriter::new(output), Compression::default());

    let copied = io::copy(&mut reader, &mut encoder).and_then(|_| encoder.finish());
    if let Err(e) = copied {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&tmp_path, &gz_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Err(e) = fs::remove_file(path) {
        // Archive exists; the leftover original is retried on the next pass.
        eprintln!(
            "[fanlog] archived '{}' but could not remove the original: {}",
            path.display(),
            e
        );
    }

    Ok(())
}

/// Archive name for a log file: the log suffix replaced by `.gz`.
pub fn archived_name(path: &Path) -> PathBuf {
    path.with_extension(ARCHIVE_EXT)
}

/// Delete the oldest archives beyond the retention limit.
fn prune_archives(dir: &Path, max_retained: usize) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    let mut archives: Vec<(SystemTime, PathBuf)> = entries
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if !has_suffix(&path, ARCHIVE_EXT) {
                return None;
            }
            let modified = entry.metadata().ok()?.modified().ok()?;
            Some((modified, path))
        })
        .collect();

    if archives.len() <= max_retained {
        return;
    }

    // Oldest first.
    archives.sort_by_key(|(modified, _)| *modified);
    let excess = archives.len() - max_retained;
    for (_, path) in archives.into_iter().take(excess) {
        if let Err(e) = fs::remove_file(&path) {
            eprintln!("[fanlog] cannot prune archive '{}': {}", path.display(), e);
        }
    }
}
