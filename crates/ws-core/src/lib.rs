//! Wearsim core: configuration, roster reconciliation, and the emission loop.
//!
//! This crate wires the pure signal layer (`ws-signal`) and the row store
//! (`ws-telemetry`) into a running emitter:
//! - `config`: env + CLI settings resolution with fail-fast validation
//! - `roster`: tolerant membership-document reader
//! - `registry`: known-wearer set and the periodic reconciliation diff
//! - `scheduler`: the tick loop with per-pair failure isolation
//! - `logging`: tracing subscriber setup

pub mod config;
pub mod logging;
pub mod registry;
pub mod roster;
pub mod scheduler;

pub use config::{ConfigError, Settings};
pub use registry::{ReconcileReport, Registry, POLL_INTERVAL};
