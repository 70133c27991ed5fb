//! Metric channel enumeration.
//!
//! Every synthesized data stream is one of these channels. The set is fixed
//! at compile time; a channel only becomes active at runtime when an output
//! directory is configured for it.

use std::fmt;
use std::str::FromStr;

/// Named metric channels, one per output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    Activity,
    Calmness,
    Mobility,
    Cadence,
    /// Pulse rate variability.
    Prv,
    /// Skin conductance.
    Skin,
    Bouts,
    LongestBout,
    PulseRate,
    SkinTemp,
    Steps,
    StepTimeVar,
    Symmetry,
    Turns,
    Walking,
}

impl Channel {
    /// All channels, in a stable order used for iteration and logging.
    pub const ALL: [Channel; 15] = [
        Channel::Activity,
        Channel::Calmness,
        Channel::Mobility,
        Channel::Cadence,
        Channel::Prv,
        Channel::Skin,
        Channel::Bouts,
        Channel::LongestBout,
        Channel::PulseRate,
        Channel::SkinTemp,
        Channel::Steps,
        Channel::StepTimeVar,
        Channel::Symmetry,
        Channel::Turns,
        Channel::Walking,
    ];

    /// Get the snake_case name used in env vars, logs, and tests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Activity => "activity",
            Channel::Calmness => "calmness",
            Channel::Mobility => "mobility",
            Channel::Cadence => "cadence",
            Channel::Prv => "prv",
            Channel::Skin => "skin",
            Channel::Bouts => "bouts",
            Channel::LongestBout => "longest_bout",
            Channel::PulseRate => "pulse_rate",
            Channel::SkinTemp => "skin_temp",
            Channel::Steps => "steps",
            Channel::StepTimeVar => "step_time_var",
            Channel::Symmetry => "symmetry",
            Channel::Turns => "turns",
            Channel::Walking => "walking",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for unrecognized channel names.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown channel: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_channels_round_trip_names() {
        for channel in Channel::ALL {
            let parsed: Channel = channel.as_str().parse().unwrap();
            assert_eq!(parsed, channel);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("heart_rate".parse::<Channel>().is_err());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Channel::LongestBout.to_string(), "longest_bout");
        assert_eq!(Channel::Prv.to_string(), "prv");
    }
}
