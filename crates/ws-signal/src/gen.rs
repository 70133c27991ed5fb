//! Per-channel waveform generators.
//!
//! Almost every generator follows the same shape: a slow periodic wave
//! whose phase is offset by the wearer's seed (so co-located wearers
//! desynchronize), a small per-wearer constant bias from the same seed,
//! independent uniform jitter, and a clamp to the channel's valid range.
//! The categorical channels (bouts, steps) draw from fixed tiered
//! distributions instead.

use chrono::{NaiveDateTime, Timelike};
use rand::Rng;
use std::f64::consts::TAU;
use std::ops::RangeInclusive;
use ws_common::{Channel, Profile, WearerId};

/// Synthesize one reading for a (channel, wearer) pair at `now`.
///
/// Never panics; the result always lies within `valid_range(profile,
/// channel)`. `now` is local wall-clock time (only the time-of-day feeds
/// the waveforms).
pub fn generate<R: Rng + ?Sized>(
    profile: Profile,
    channel: Channel,
    now: NaiveDateTime,
    wearer: &WearerId,
    rng: &mut R,
) -> f64 {
    let mid = f64::from(now.num_seconds_from_midnight());
    let u = wearer.seed();

    match (profile, channel) {
        (Profile::PerMinute, Channel::Activity) => minute_activity(mid, u, rng),
        (Profile::PerMinute, Channel::Calmness) => minute_calmness(mid, u, rng),
        (Profile::PerMinute, Channel::Mobility) => minute_mobility(mid, u, rng),
        (_, Channel::Activity) => activity(mid, u, rng),
        (_, Channel::Calmness) => calmness(mid, u, rng),
        (_, Channel::Mobility) => mobility(mid, u, rng),
        (_, Channel::Cadence) => cadence(mid, u, rng),
        (_, Channel::Prv) => prv(mid, u, rng),
        (_, Channel::Skin) => skin(f64::from(now.second()), u, rng),
        (_, Channel::Bouts) => bouts(rng),
        (_, Channel::LongestBout) => longest_bout(mid, u, rng),
        (_, Channel::PulseRate) => pulse_rate(mid, u, rng),
        (_, Channel::SkinTemp) => skin_temp(mid, u, rng),
        (_, Channel::Steps) => steps(rng),
        (_, Channel::StepTimeVar) => step_time_var(mid, u, rng),
        (_, Channel::Symmetry) => symmetry(mid, u, rng),
        (_, Channel::Turns) => turns(mid, u, rng),
        (_, Channel::Walking) => walking(mid, u, rng),
    }
}

/// The closed interval every generated value lies in.
pub fn valid_range(profile: Profile, channel: Channel) -> RangeInclusive<f64> {
    if profile == Profile::PerMinute {
        match channel {
            Channel::Activity => return 23.0..=31.0,
            Channel::Calmness => return 40.0..=60.0,
            Channel::Mobility => return 10.0..=20.0,
            _ => {}
        }
    }
    match channel {
        Channel::Activity | Channel::Calmness | Channel::Mobility => 0.0..=1.0,
        Channel::Cadence => 35.0..=80.0,
        Channel::Prv => 5.0..=100.0,
        Channel::Skin => 0.0..=0.08,
        Channel::Bouts => 0.0..=6.0,
        Channel::LongestBout => 2.0..=300.0,
        Channel::PulseRate => 50.0..=120.0,
        Channel::SkinTemp => 32.120..=32.220,
        Channel::Steps => 0.0..=4.0,
        Channel::StepTimeVar => 0.40..=0.80,
        Channel::Symmetry => 0.885..=0.915,
        Channel::Turns => 1.40..=2.20,
        Channel::Walking => 0.80..=1.80,
    }
}

/// Phase-offset sinusoid: `amp * sin(2π (mid + seed % period) / period)`.
fn wave(mid: f64, u: u64, period: u64, amp: f64) -> f64 {
    amp * (TAU * (mid + (u % period) as f64) / period as f64).sin()
}

/// Cosine variant of [`wave`], anti-phase partner for calmness/prv.
fn cowave(mid: f64, u: u64, period: u64, amp: f64) -> f64 {
    amp * (TAU * (mid + (u % period) as f64) / period as f64).cos()
}

/// Per-wearer constant bias: `center + ((seed % modulus) - half) * step`.
fn bias(u: u64, center: f64, modulus: u64, step: f64) -> f64 {
    let half = (modulus / 2) as f64;
    center + ((u % modulus) as f64 - half) * step
}

// --- per-second generators ------------------------------------------------

fn activity<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    let v = bias(u, 0.60, 7, 0.005) + wave(mid, u, 86_400, 0.25) + rng.random_range(-0.05..=0.05);
    v.clamp(0.0, 1.0)
}

fn calmness<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    let v = bias(u, 0.50, 5, 0.004) + cowave(mid, u, 86_400, 0.30) + rng.random_range(-0.05..=0.05);
    v.clamp(0.0, 1.0)
}

fn mobility<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    // ~90 minute cycle
    let v = bias(u, 0.30, 9, 0.003) + wave(mid, u, 5_400, 0.25) + rng.random_range(-0.04..=0.04);
    v.clamp(0.0, 1.0)
}

fn cadence<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    let v = bias(u, 52.0, 5, 0.3) + wave(mid, u, 86_400, 7.0) + rng.random_range(-2.0..=2.0);
    v.clamp(35.0, 80.0)
}

fn prv<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    // ~6 hour cycle
    let v = bias(u, 40.0, 7, 0.5) + cowave(mid, u, 21_600, 18.0) + rng.random_range(-6.0..=6.0);
    v.clamp(5.0, 100.0)
}

/// Skin conductance: tonic base + 45 s phasic micro-cycle, 7% spike chance,
/// and 20% of samples forced to exactly zero (sparse signal).
fn skin<R: Rng + ?Sized>(second: f64, u: u64, rng: &mut R) -> f64 {
    let base = bias(u, 0.02, 9, 0.0008);
    let phasic = 0.015 * (1.0 + (TAU * (second + (u % 120) as f64) / 45.0).sin());
    let spike = if rng.random::<f64>() < 0.07 {
        rng.random_range(0.02..=0.05)
    } else {
        0.0
    };
    if rng.random::<f64>() < 0.20 {
        return 0.0;
    }
    let noise = rng.random_range(-0.004..=0.004);
    (base + phasic + spike + noise).clamp(0.0, 0.08)
}

/// Bouts per period: 75% in {0,1}, 18% in {2,3}, 7% in {4,5,6}.
fn bouts<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let r = rng.random::<f64>();
    let v: u32 = if r < 0.75 {
        rng.random_range(0..=1)
    } else if r < 0.93 {
        rng.random_range(2..=3)
    } else {
        rng.random_range(4..=6)
    };
    f64::from(v)
}

fn longest_bout<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    // wave term spans 0..120 seconds
    let wave = 60.0 * (1.0 + (TAU * (mid + (u % 5_000) as f64) / 5_000.0).sin());
    let v = bias(u, 30.0, 7, 2.0) + wave + rng.random_range(-10.0..=10.0);
    v.clamp(2.0, 300.0)
}

fn pulse_rate<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    let v = bias(u, 75.0, 9, 0.6) + wave(mid, u, 86_400, 12.0) + rng.random_range(-6.0..=6.0);
    v.clamp(50.0, 120.0)
}

fn skin_temp<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    let v = bias(u, 32.170, 5, 0.001) + wave(mid, u, 4_000, 0.010) + rng.random_range(-0.006..=0.006);
    v.clamp(32.120, 32.220)
}

/// Steps per period: 80% zero, 15% in {1,2}, 5% in {3,4}.
fn steps<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let r = rng.random::<f64>();
    if r < 0.80 {
        0.0
    } else if r < 0.95 {
        f64::from(rng.random_range(1u32..=2))
    } else {
        f64::from(rng.random_range(3u32..=4))
    }
}

fn step_time_var<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    let v = bias(u, 0.56, 7, 0.002) + wave(mid, u, 7_200, 0.06) + rng.random_range(-0.04..=0.04);
    v.clamp(0.40, 0.80)
}

fn symmetry<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    let v = bias(u, 0.900, 5, 0.0005) + wave(mid, u, 600, 0.003) + rng.random_range(-0.0025..=0.0025);
    v.clamp(0.885, 0.915)
}

fn turns<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    let v = bias(u, 1.80, 7, 0.01) + wave(mid, u, 1_800, 0.18) + rng.random_range(-0.08..=0.08);
    v.clamp(1.40, 2.20)
}

fn walking<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    let v = bias(u, 1.20, 5, 0.01) + wave(mid, u, 2_700, 0.25) + rng.random_range(-0.12..=0.12);
    v.clamp(0.80, 1.80)
}

// --- per-minute generators ------------------------------------------------
//
// The minute profile uses wider literal ranges and rounds to 2 decimal
// places instead of clamping: amplitudes are chosen so wave + bias +
// jitter cannot leave the documented interval.

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn minute_activity<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    // [23, 31]
    round2(bias(u, 27.0, 7, 0.1) + wave(mid, u, 86_400, 2.0) + rng.random_range(-1.0..=1.0))
}

fn minute_calmness<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    // [40, 60]
    round2(bias(u, 50.0, 5, 0.5) + cowave(mid, u, 86_400, 6.0) + rng.random_range(-2.0..=2.0))
}

fn minute_mobility<R: Rng + ?Sized>(mid: f64, u: u64, rng: &mut R) -> f64 {
    // [10, 20]
    round2(bias(u, 15.0, 9, 0.2) + wave(mid, u, 5_400, 3.0) + rng.random_range(-1.0..=1.0))
}
