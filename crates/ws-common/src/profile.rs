//! Cadence profile selection.
//!
//! The emitter supports two interchangeable profiles:
//! - `PerSecond`: one row per second per (wearer, channel), all 15 channels,
//!   unconditional append.
//! - `PerMinute`: one row per clock minute for a reduced channel set, with
//!   an idempotence check against the file tail so a re-run or drifting
//!   tick never duplicates a minute.

use crate::channel::Channel;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Tick granularity and idempotence policy for the emission loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    PerSecond,
    PerMinute,
}

/// Channel subset synthesized by the per-minute profile.
const MINUTE_CHANNELS: [Channel; 3] = [Channel::Activity, Channel::Calmness, Channel::Mobility];

impl Profile {
    /// Nominal tick length for this profile.
    pub fn tick(&self) -> Duration {
        match self {
            Profile::PerSecond => Duration::from_secs(1),
            Profile::PerMinute => Duration::from_secs(60),
        }
    }

    /// Channels this profile synthesizes.
    pub fn channels(&self) -> &'static [Channel] {
        match self {
            Profile::PerSecond => &Channel::ALL,
            Profile::PerMinute => &MINUTE_CHANNELS,
        }
    }

    /// Whether appends must be guarded by the once-per-period check.
    pub fn idempotent(&self) -> bool {
        matches!(self, Profile::PerMinute)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::PerSecond => "second",
            Profile::PerMinute => "minute",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for unrecognized profile names.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown profile: {0} (expected \"second\" or \"minute\")")]
pub struct UnknownProfile(pub String);

impl FromStr for Profile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "second" => Ok(Profile::PerSecond),
            "minute" => Ok(Profile::PerMinute),
            other => Err(UnknownProfile(other.to_string())),
        }
    }
}
