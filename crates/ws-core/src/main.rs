//! Wearsim - synthetic wearable telemetry emitter.
//!
//! Discovers wearers from a membership document, synthesizes per-channel
//! sensor readings, and appends them as timestamped CSV rows, one file per
//! (wearer, channel). The roster is re-read every 15 seconds; arrivals get
//! files provisioned, departures are handled per the removal policy.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use ws_common::Profile;
use ws_core::logging::init_logging;
use ws_core::scheduler;
use ws_core::{Registry, Settings};
use ws_telemetry::RemovalPolicy;

/// Synthetic wearable telemetry emitter
#[derive(Parser, Debug)]
#[command(name = "ws-core")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the wearer membership document
    #[arg(long, env = "WEARERS_JSON")]
    wearers: Option<PathBuf>,

    /// Cadence profile: "second" (all channels, 1 s) or "minute"
    /// (activity/calmness/mobility, clock-minute aligned, idempotent)
    #[arg(long, env = "WS_PROFILE", default_value = "second")]
    profile: Profile,

    /// Delete a wearer's files when it leaves the roster
    #[arg(long, env = "DELETE_ON_REMOVAL")]
    delete_on_removal: bool,

    /// Log intended deletions without touching any files
    #[arg(long, env = "DRY_RUN")]
    dry_run: bool,

    /// Stop after this many ticks (0 = run forever)
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (warnings and errors only)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let removal = RemovalPolicy {
        delete_on_removal: cli.delete_on_removal,
        dry_run: cli.dry_run,
    };
    let settings = match Settings::resolve(cli.wearers, cli.profile, removal, cli.ticks) {
        Ok(settings) => settings,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        profile = %settings.profile,
        channels = settings.dirs.len(),
        delete_on_removal = removal.delete_on_removal,
        dry_run = removal.dry_run,
        "starting emitter"
    );

    // One reconciliation pass seeds the known set and provisions files.
    let mut registry = Registry::new();
    let fresh = ws_core::roster::load_wearer_ids(&settings.wearers_path);
    registry.reconcile(fresh, &settings.dirs, settings.removal);

    scheduler::run(&settings, &mut registry);
    ExitCode::SUCCESS
}
