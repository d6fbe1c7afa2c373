//! Rotation and archival tests
//!
//! The file sink takes an injected clock, so these tests cross midnight
//! deterministically instead of waiting for a real day boundary.

use chrono::{DateTime, Local, TimeZone};
use fanlog::prelude::*;
use fanlog::Clock;
use parking_lot::RwLock;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn shared_clock(start: DateTime<Local>) -> (Clock, Arc<RwLock<DateTime<Local>>>) {
    let shared = Arc::new(RwLock::new(start));
    let handle = Arc::clone(&shared);
    let clock: Clock = Arc::new(move || *handle.read());
    (clock, shared)
}

fn file_sink_config(dir: &Path, archive: bool) -> Config {
    let mut cfg = Config::default();
    cfg.console = false;
    cfg.file = false; // the test injects its own clocked sink
    cfg.file_level = "DEBU".to_string();
    cfg.file_name_format = dir.join("%Y%m%d.log").to_str().unwrap().to_string();
    cfg.file_archive = archive;
    cfg.normalized()
}

fn clocked_sink(cfg: &Config, clock: Clock) -> FileSink {
    FileSink::from_config(cfg).expect("valid config").with_clock(clock)
}

fn age_file(path: &Path, age: Duration) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
}

#[test]
fn test_midnight_rotation_splits_records_by_day() {
    let dir = TempDir::new().expect("tempdir");
    let cfg = file_sink_config(dir.path(), false);

    let before = Local.with_ymd_and_hms(2025, 3, 14, 23, 59, 50).unwrap();
    let (clock, shared) = shared_clock(before);

    let logger = Logger::builder()
        .config(cfg.clone())
        .sink(clocked_sink(&cfg, clock))
        .build();

    logger.info(vec![Part::from("before the boundary")]);
    assert!(logger.flush());

    *shared.write() = Local.with_ymd_and_hms(2025, 3, 15, 0, 0, 5).unwrap();

    logger.info(vec![Part::from("after the boundary")]);
    assert!(logger.flush());
    assert!(logger.close());

    let old_file = dir.path().join("20250314.log");
    let new_file = dir.path().join("20250315.log");
    assert!(old_file.exists(), "old day's file must remain");
    assert!(new_file.exists(), "new day's file must be created");

    let old_content = fs::read_to_string(&old_file).unwrap();
    let new_content = fs::read_to_string(&new_file).unwrap();
    assert!(old_content.contains("before the boundary"));
    assert!(!old_content.contains("after the boundary"));
    assert!(new_content.contains("after the boundary"));
    assert!(!new_content.contains("before the boundary"));
}

#[test]
fn test_rotation_triggers_background_archival() {
    let dir = TempDir::new().expect("tempdir");
    let cfg = file_sink_config(dir.path(), true);

    // A stale rotated file from an earlier run, old enough to archive.
    let stale = dir.path().join("20250301.log");
    fs::write(&stale, "stale content\n").unwrap();
    age_file(&stale, Duration::from_secs(25 * 60 * 60));

    let before = Local.with_ymd_and_hms(2025, 3, 14, 23, 59, 55).unwrap();
    let (clock, shared) = shared_clock(before);

    let logger = Logger::builder()
        .config(cfg.clone())
        .sink(clocked_sink(&cfg, clock))
        .build();

    logger.info(vec![Part::from("day one")]);
    assert!(logger.flush());

    *shared.write() = Local.with_ymd_and_hms(2025, 3, 15, 0, 0, 10).unwrap();
    logger.info(vec![Part::from("day two")]);
    assert!(logger.flush());

    // Archival runs on its own thread; wait for it to land.
    let archive = dir.path().join("20250301.gz");
    for _ in 0..100 {
        if archive.exists() && !stale.exists() {
            break;
        }
        std::thread::sleep(Duration::from_millis(50));
    }

    assert!(archive.exists(), "stale file must be compressed");
    assert!(!stale.exists(), "original must be removed after compression");

    // Yesterday's file is younger than 24h and must survive untouched.
    assert!(dir.path().join("20250314.log").exists());
    assert!(!dir.path().join("20250314.gz").exists());

    assert!(logger.close());
}

#[test]
fn test_degraded_sink_recovers_on_next_rotation() {
    let dir = TempDir::new().expect("tempdir");

    // A regular file where the log directory should go makes every open fail.
    let blocker = dir.path().join("log");
    fs::write(&blocker, "in the way").unwrap();

    let mut cfg = Config::default();
    cfg.console = false;
    cfg.file_level = "DEBU".to_string();
    cfg.file_name_format = dir.path().join("log/%Y%m%d.log").to_str().unwrap().to_string();
    let cfg = cfg.normalized();

    let mut sink = FileSink::from_config(&cfg).unwrap();
    let record = LogRecord::new(Level::Info, vec![Part::from("while degraded")]);
    assert!(
        matches!(sink.handle(&record), Err(WriteError::Degraded("file"))),
        "writes fail while no handle can be opened"
    );

    // Clear the obstruction; the next write retries rotation and succeeds.
    fs::remove_file(&blocker).unwrap();
    let record = LogRecord::new(Level::Info, vec![Part::from("after recovery")]);
    sink.handle(&record).unwrap();
    sink.flush().unwrap();

    let content = fs::read_to_string(sink.active_path()).unwrap();
    assert!(content.contains("after recovery"));
    assert!(!content.contains("while degraded"));
}

#[test]
fn test_line_rotation_moves_full_file_aside() {
    let dir = TempDir::new().expect("tempdir");

    let mut cfg = Config::default();
    cfg.console = false;
    cfg.file_level = "DEBU".to_string();
    cfg.file_name_format = dir.path().join("app.log").to_str().unwrap().to_string();
    cfg.file_rotate_type = "line".to_string();
    cfg.file_max_line = 3;
    let cfg = cfg.normalized();

    let mut sink = FileSink::from_config(&cfg).unwrap();
    for i in 0..5u32 {
        let record = LogRecord::new(Level::Info, vec![Part::from("line"), Part::from(i)]);
        sink.handle(&record).unwrap();
    }
    sink.flush().unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    let backups = names.iter().filter(|n| n.starts_with("app.log.")).count();
    assert_eq!(backups, 1, "one full file moved aside, found {:?}", names);

    let active = fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert!(active.contains("line 3"));
    assert!(!active.contains("line 0"));
}
