//! Wearsim signal synthesis.
//!
//! This crate provides the pure computation layer of the emitter:
//! - `gen`: per-channel waveform generators (slow sinusoid + per-wearer
//!   bias + jitter, clamped to the channel's documented range)
//! - `fmt`: per-channel canonical text rendering of generated values
//!
//! No I/O happens here; randomness is injected so tests stay deterministic.

pub mod fmt;
pub mod gen;

pub use fmt::format;
pub use gen::{generate, valid_range};
