//! Append-only row files.
//!
//! Each (wearer, channel) pair owns one CSV file `<dir>/<wearer>.csv` with
//! header `x,y,time,date`. The header is written exactly once, lazily, when
//! the file is absent or empty; every later write appends a single row. The
//! `x` column carries local wall-clock time with a colon-separated UTC
//! offset; `time` and `date` repeat the same instant split out.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use thiserror::Error;
use tracing::{debug, info};

use ws_common::WearerId;

/// How many bytes of the file tail to scan for the last data row.
const TAIL_WINDOW: u64 = 4 * 1024;

/// Timestamp layout of the `x` column, minus the offset suffix.
const X_STAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Errors from row store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Path of the row file for a wearer under a channel directory.
pub fn row_path(dir: &Path, wearer: &WearerId) -> PathBuf {
    dir.join(format!("{}.csv", wearer))
}

/// Create the directory tree and the header row if the file is absent or
/// zero-length. Idempotent; safe to call every tick.
pub fn ensure_ready(dir: &Path, wearer: &WearerId) -> Result<PathBuf, StoreError> {
    fs::create_dir_all(dir)?;
    let path = row_path(dir, wearer);

    let needs_header = match fs::metadata(&path) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    };
    if needs_header {
        let file = File::create(&path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(crate::HEADER)?;
        writer.flush()?;
        info!(path = %path.display(), "header created");
    }

    Ok(path)
}

/// Append one formatted row for the given instant.
///
/// The whole row is handed to the OS in a single write, so a row is never
/// left half-applied.
pub fn append(path: &Path, y: &str, now: DateTime<Local>) -> Result<(), StoreError> {
    let x = now.format("%Y-%m-%d %H:%M:%S%:z").to_string();
    let time = now.format("%H:%M:%S").to_string();
    let date = now.format("%Y-%m-%d").to_string();

    let file = OpenOptions::new().append(true).open(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record([x.as_str(), y, time.as_str(), date.as_str()])?;
    writer.flush()?;
    Ok(())
}

/// Check whether a row was already written for the clock minute containing
/// `period_start`.
///
/// Reads only the file tail, parses the last data row's `x` column with the
/// offset suffix ignored, and compares at minute granularity. Both sides
/// are truncated to the minute here, so callers may pass a raw wall-clock
/// instant with seconds and sub-second nanos intact. A missing file,
/// header-only file, or malformed last line counts as "not yet emitted" —
/// the safe default.
pub fn already_emitted(path: &Path, period_start: NaiveDateTime) -> bool {
    let Some(last) = last_line(path) else {
        return false;
    };
    let Some(x) = last.split(',').next() else {
        return false;
    };
    // "YYYY-MM-DD HH:MM:SS" is 19 chars; the offset suffix follows.
    let Some(stamp) = x.get(..19) else {
        return false;
    };
    let Ok(ts) = NaiveDateTime::parse_from_str(stamp, X_STAMP) else {
        debug!(path = %path.display(), last = %x, "unparseable tail row, treating as not emitted");
        return false;
    };
    truncate_to_minute(ts) == truncate_to_minute(period_start)
}

/// Zero out seconds and sub-second nanos. Wall-clock instants carry nanos
/// on every real tick; the parsed tail timestamp never does.
fn truncate_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

/// Last non-empty line within the tail window, or None for absent/empty
/// files and files that only hold the header.
fn last_line(path: &Path) -> Option<String> {
    let mut file = File::open(path).ok()?;
    let len = file.metadata().ok()?.len();
    if len == 0 {
        return None;
    }
    let start = len.saturating_sub(TAIL_WINDOW);
    file.seek(SeekFrom::Start(start)).ok()?;
    let mut buf = Vec::with_capacity((len - start) as usize);
    file.read_to_end(&mut buf).ok()?;
    let text = String::from_utf8_lossy(&buf);
    let line = text.lines().rev().find(|l| !l.trim().is_empty())?;
    if line.trim() == crate::HEADER.join(",") {
        return None;
    }
    Some(line.to_string())
}
