//! Tick emission end to end: generate, format, append, and the
//! minute-cadence idempotence guard.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Local, TimeZone};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;
use ws_common::{Channel, Profile, WearerId};
use ws_core::scheduler::emit_tick;
use ws_core::Settings;
use ws_telemetry::RemovalPolicy;

fn settings_for(root: &TempDir, profile: Profile, channels: &[Channel]) -> Settings {
    let dirs: BTreeMap<Channel, PathBuf> = channels
        .iter()
        .map(|c| (*c, root.path().join(c.as_str())))
        .collect();
    Settings {
        wearers_path: root.path().join("wearers.json"),
        dirs,
        profile,
        removal: RemovalPolicy::default(),
        ticks: None,
    }
}

fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 8, 30, h, m, s).unwrap()
}

#[test]
fn per_second_tick_appends_one_row_per_pair() {
    let root = TempDir::new().unwrap();
    let settings = settings_for(
        &root,
        Profile::PerSecond,
        &[Channel::Activity, Channel::Cadence, Channel::Bouts],
    );
    let wearers = BTreeSet::from([WearerId::new("42"), WearerId::new("7")]);
    let mut rng = StdRng::seed_from_u64(1);

    emit_tick(&settings, &wearers, at(12, 0, 0), &mut rng);
    emit_tick(&settings, &wearers, at(12, 0, 1), &mut rng);

    for (channel, dir) in &settings.dirs {
        for id in ["42", "7"] {
            let contents = fs::read_to_string(dir.join(format!("{id}.csv"))).unwrap();
            let lines: Vec<&str> = contents.lines().collect();
            assert_eq!(lines.len(), 3, "{channel}/{id}: header + 2 rows");
            assert_eq!(lines[0], "x,y,time,date");
        }
    }
}

#[test]
fn minute_profile_skips_duplicate_ticks_in_same_minute() {
    let root = TempDir::new().unwrap();
    let settings = settings_for(&root, Profile::PerMinute, &[Channel::Activity]);
    let wearers = BTreeSet::from([WearerId::new("42")]);
    let mut rng = StdRng::seed_from_u64(2);

    // Two ticks inside the same clock minute, then one in the next.
    emit_tick(&settings, &wearers, at(12, 30, 0), &mut rng);
    emit_tick(&settings, &wearers, at(12, 30, 40), &mut rng);
    emit_tick(&settings, &wearers, at(12, 31, 0), &mut rng);

    let contents =
        fs::read_to_string(settings.dirs[&Channel::Activity].join("42.csv")).unwrap();
    let rows: Vec<&str> = contents.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains("12:30:00"));
    assert!(rows[1].contains("12:31:00"));
}

#[test]
fn minute_guard_holds_for_subsecond_tick_timestamps() {
    let root = TempDir::new().unwrap();
    let settings = settings_for(&root, Profile::PerMinute, &[Channel::Activity]);
    let wearers = BTreeSet::from([WearerId::new("42")]);
    let mut rng = StdRng::seed_from_u64(5);

    // Real ticks carry sub-second nanos on the wall clock; the guard must
    // still recognize the second tick as the same minute.
    let first = at(12, 30, 3) + Duration::nanoseconds(123_456_789);
    let second = at(12, 30, 41) + Duration::nanoseconds(987_654_321);
    emit_tick(&settings, &wearers, first, &mut rng);
    emit_tick(&settings, &wearers, second, &mut rng);

    let contents =
        fs::read_to_string(settings.dirs[&Channel::Activity].join("42.csv")).unwrap();
    assert_eq!(contents.lines().skip(1).count(), 1);
}

#[test]
fn minute_profile_values_are_plain_rounded_numbers() {
    let root = TempDir::new().unwrap();
    let settings = settings_for(&root, Profile::PerMinute, &[Channel::Mobility]);
    let wearers = BTreeSet::from([WearerId::new("42")]);
    let mut rng = StdRng::seed_from_u64(3);

    emit_tick(&settings, &wearers, at(9, 0, 0), &mut rng);

    let contents =
        fs::read_to_string(settings.dirs[&Channel::Mobility].join("42.csv")).unwrap();
    let row = contents.lines().nth(1).unwrap();
    let y: f64 = row.split(',').nth(1).unwrap().parse().unwrap();
    assert!((10.0..=20.0).contains(&y));
}

#[test]
fn inactive_channels_are_skipped() {
    let root = TempDir::new().unwrap();
    // Only activity configured; the other 14 channels have no directory.
    let settings = settings_for(&root, Profile::PerSecond, &[Channel::Activity]);
    let wearers = BTreeSet::from([WearerId::new("42")]);
    let mut rng = StdRng::seed_from_u64(4);

    emit_tick(&settings, &wearers, at(12, 0, 0), &mut rng);

    let entries: Vec<_> = fs::read_dir(root.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("activity")]);
}
