//! Canonical text rendering of generated values.
//!
//! Each channel has exactly one formatting policy; formatting is total and
//! deterministic so the same value always persists identically.

use ws_common::{Channel, Profile};

/// Render a generated value for persistence.
pub fn format(profile: Profile, channel: Channel, value: f64) -> String {
    if profile == Profile::PerMinute {
        // Minute-profile values are pre-rounded to 2 decimals and written
        // as plain numbers, trailing zeros trimmed.
        return trim(value, 2);
    }
    match channel {
        Channel::Activity | Channel::Calmness | Channel::Mobility => fixed(value, 8),
        Channel::Cadence
        | Channel::Prv
        | Channel::SkinTemp
        | Channel::Symmetry
        | Channel::Walking => fixed(value, 3),
        Channel::Turns => fixed(value, 2),
        Channel::Bouts | Channel::LongestBout | Channel::PulseRate | Channel::Steps => int(value),
        Channel::StepTimeVar => trim(value, 4),
        Channel::Skin => trim(value, 8),
    }
}

fn fixed(value: f64, places: usize) -> String {
    format!("{value:.places$}")
}

/// Integer rendering, rounding half away from zero.
fn int(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Fixed-precision rendering with trailing zeros trimmed, always keeping
/// at least one decimal digit: 0.0600 renders "0.06", 0.0 renders "0.0".
fn trim(value: f64, places: usize) -> String {
    let mut s = format!("{value:.places$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}
