//! The emission loop.
//!
//! Single-threaded cooperative loop. Each tick: reconcile the roster if the
//! poll interval has elapsed, snapshot the known wearer set, then for every
//! (wearer, active channel) pair generate, format, and append one row. A
//! failure on one pair is logged and never aborts the rest of the tick.

use std::collections::BTreeSet;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, Timelike};
use rand::Rng;
use tracing::{debug, warn};

use ws_common::{Channel, Profile, WearerId};
use ws_telemetry::StoreError;

use crate::config::Settings;
use crate::registry::Registry;
use crate::roster;

/// Run the loop until the configured tick budget is exhausted (forever when
/// no budget is set).
pub fn run(settings: &Settings, registry: &mut Registry) {
    let mut rng = rand::rng();
    let mut ticks_done: u64 = 0;

    loop {
        let tick_start = Instant::now();
        if registry.poll_due(tick_start) {
            registry.mark_polled(tick_start);
            let fresh = roster::load_wearer_ids(&settings.wearers_path);
            registry.reconcile(fresh, &settings.dirs, settings.removal);
        }

        emit_tick(settings, registry.known(), Local::now(), &mut rng);

        ticks_done += 1;
        if let Some(budget) = settings.ticks {
            if ticks_done >= budget {
                return;
            }
        }
        sleep_until_next(settings.profile);
    }
}

/// Emit one row per (wearer, active channel) pair for this tick.
///
/// The wearer set is snapshotted up front; pairs are independent and a
/// per-pair error only skips that pair.
pub fn emit_tick<R: Rng + ?Sized>(
    settings: &Settings,
    wearers: &BTreeSet<WearerId>,
    now: DateTime<Local>,
    rng: &mut R,
) {
    let snapshot: Vec<WearerId> = wearers.iter().cloned().collect();
    for wearer in &snapshot {
        for channel in settings.profile.channels() {
            let Some(dir) = settings.dirs.get(channel) else {
                continue;
            };
            if let Err(e) = emit_pair(settings, *channel, dir, wearer, now, rng) {
                warn!(%wearer, %channel, error = %e, "emission failed for pair");
            }
        }
    }
}

fn emit_pair<R: Rng + ?Sized>(
    settings: &Settings,
    channel: Channel,
    dir: &Path,
    wearer: &WearerId,
    now: DateTime<Local>,
    rng: &mut R,
) -> Result<(), StoreError> {
    // Re-provisions a file deleted out from under us mid-run.
    let path = ws_telemetry::ensure_ready(dir, wearer)?;

    let naive = now.naive_local();
    if settings.profile.idempotent() && ws_telemetry::already_emitted(&path, naive) {
        debug!(%wearer, %channel, "row already present for this minute, skipping");
        return Ok(());
    }

    let value = ws_signal::generate(settings.profile, channel, naive, wearer, rng);
    let y = ws_signal::format(settings.profile, channel, value);
    ws_telemetry::append(&path, &y, now)
}

/// Sleep out the rest of the current period.
///
/// Per-second ticks use a plain one-second delay; per-minute ticks sleep to
/// the next clock-minute boundary so rows land aligned.
fn sleep_until_next(profile: Profile) {
    match profile {
        Profile::PerSecond => thread::sleep(profile.tick()),
        Profile::PerMinute => {
            let now = Local::now();
            let into_minute = u64::from(now.second());
            let subsec = u64::from(now.nanosecond() % 1_000_000_000);
            let wait = Duration::from_secs(59 - into_minute.min(59))
                + Duration::from_nanos(1_000_000_000 - subsec);
            thread::sleep(wait);
        }
    }
}
