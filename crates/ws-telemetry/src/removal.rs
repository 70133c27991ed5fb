//! Best-effort removal of a departed wearer's row files.
//!
//! Removal is governed by two independent flags: dry-run (log the intended
//! deletion, touch nothing) and delete-on-removal (actually delete). With
//! neither set, departure is observed but the file stays — soft retention
//! is the safe default. Failures are captured in the outcome and logged,
//! never propagated.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::writer::row_path;
use ws_common::WearerId;

/// Flags controlling what happens to a removed wearer's files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalPolicy {
    /// Actually delete files when a wearer leaves the roster.
    pub delete_on_removal: bool,
    /// Log intended deletions without performing any I/O.
    pub dry_run: bool,
}

/// What happened to one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// File existed and was deleted.
    Deleted,
    /// Dry-run mode: deletion was logged but not performed.
    SkippedDryRun,
    /// Deletion disabled: file observed and left in place.
    SkippedDisabled,
    /// No file existed for this (wearer, channel) pair.
    NotFound,
    /// Deletion was attempted and failed (permissions, lock, ...).
    Failed(String),
}

/// Remove a wearer's row file under one channel directory, per policy.
pub fn remove(dir: &Path, wearer: &WearerId, policy: RemovalPolicy) -> RemovalOutcome {
    let path = row_path(dir, wearer);
    if !path.exists() {
        return RemovalOutcome::NotFound;
    }
    if policy.dry_run {
        info!(path = %path.display(), "dry run: would delete");
        return RemovalOutcome::SkippedDryRun;
    }
    if !policy.delete_on_removal {
        debug!(path = %path.display(), "deletion disabled, leaving file");
        return RemovalOutcome::SkippedDisabled;
    }
    match fs::remove_file(&path) {
        Ok(()) => {
            info!(path = %path.display(), "deleted");
            RemovalOutcome::Deleted
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "delete failed");
            RemovalOutcome::Failed(e.to_string())
        }
    }
}
