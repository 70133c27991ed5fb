//! Wearsim shared foundational types.
//!
//! This crate provides the types shared across the workspace:
//! - Metric channel enumeration (the fixed set of synthesized streams)
//! - Wearer identity with a stable derived waveform seed
//! - Cadence profile selection (per-second vs. per-minute emission)

pub mod channel;
pub mod profile;
pub mod wearer;

pub use channel::Channel;
pub use profile::Profile;
pub use wearer::WearerId;
