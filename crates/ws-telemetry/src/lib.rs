//! Wearsim row storage.
//!
//! This crate provides:
//! - Append-only per-(wearer, channel) CSV files with lazy header bootstrap
//! - The once-per-minute idempotence check against the file tail
//! - Best-effort wearer file removal with an explicit outcome type

pub mod removal;
pub mod writer;

pub use removal::{remove, RemovalOutcome, RemovalPolicy};
pub use writer::{already_emitted, append, ensure_ready, row_path, StoreError};

/// Header row shared by every row file.
pub const HEADER: [&str; 4] = ["x", "y", "time", "date"];
