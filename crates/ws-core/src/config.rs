//! Settings resolution and startup validation.
//!
//! Channel output directories come from environment variables, one (or a
//! few historical fallback names) per channel. Only channels with a
//! non-empty directory are active; everything else is silently skipped.
//! Validation is fail-fast: without a membership document and at least one
//! active channel the process has nothing to do and exits.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use ws_common::{Channel, Profile};
use ws_telemetry::RemovalPolicy;

/// Fatal startup configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing membership document path (set WEARERS_JSON or pass --wearers)")]
    MissingWearersPath,

    #[error("no channel directories configured (set at least one *_DIR env var)")]
    NoChannelDirs,
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path of the wearer membership document.
    pub wearers_path: PathBuf,
    /// Output directory per active channel.
    pub dirs: BTreeMap<Channel, PathBuf>,
    /// Cadence profile for the emission loop.
    pub profile: Profile,
    /// What to do with a removed wearer's files.
    pub removal: RemovalPolicy,
    /// Stop after this many ticks; `None` runs forever.
    pub ticks: Option<u64>,
}

impl Settings {
    /// Build settings from CLI values plus the env-resolved channel dirs.
    pub fn resolve(
        wearers: Option<PathBuf>,
        profile: Profile,
        removal: RemovalPolicy,
        ticks: u64,
    ) -> Result<Self, ConfigError> {
        let wearers_path = wearers.ok_or(ConfigError::MissingWearersPath)?;
        let dirs = channel_dirs(|name| std::env::var(name).ok());
        if dirs.is_empty() {
            return Err(ConfigError::NoChannelDirs);
        }
        Ok(Settings {
            wearers_path,
            dirs,
            profile,
            removal,
            ticks: (ticks > 0).then_some(ticks),
        })
    }
}

/// Environment variable names per channel, first match wins. The extra
/// names are historical spellings kept for compatibility.
fn dir_env_names(channel: Channel) -> &'static [&'static str] {
    match channel {
        Channel::Activity => &["ACTIVITY_DIR"],
        Channel::Calmness => &["CALMNESS_DIR"],
        Channel::Mobility => &["MOBILITY_DIR"],
        Channel::Cadence => &["CADENCE_DIR"],
        Channel::Prv => &["PRV_DIR"],
        Channel::Skin => &["SKIN_DIR"],
        Channel::Bouts => &["BOUTS_DIR"],
        Channel::LongestBout => &["LONGEST_BOUTS_DIR"],
        Channel::PulseRate => &["PULSE_RATE_DIR"],
        Channel::SkinTemp => &["SKIN_TEMPERATURE_DIR"],
        Channel::Steps => &["STEPS_DIR"],
        Channel::StepTimeVar => &["STEP_TIME_VARIATION_DIR", "STEP_TIMES_VARIATION_DIR"],
        Channel::Symmetry => &["SYMMETRY_DIR"],
        Channel::Turns => &["TURNS_DIR", "TURNS"],
        Channel::Walking => &["WALKING_DIR", "WALKING__DIR", "WALKING"],
    }
}

/// Resolve active channel directories through a lookup function.
///
/// Parameterized over the lookup so tests can feed a map instead of
/// mutating the process environment.
pub fn channel_dirs<F>(lookup: F) -> BTreeMap<Channel, PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let mut dirs = BTreeMap::new();
    for channel in Channel::ALL {
        let found = dir_env_names(channel)
            .iter()
            .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()));
        if let Some(dir) = found {
            dirs.insert(channel, PathBuf::from(dir));
        }
    }
    dirs
}
