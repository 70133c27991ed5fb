//! Known-wearer registry and reconciliation.
//!
//! The registry owns the only shared mutable state in the process: the set
//! of wearers the scheduler currently emits for, plus the time of the last
//! membership poll. Reconciliation diffs a freshly loaded roster against
//! the known set, provisions files for arrivals, applies the removal policy
//! to departures, then replaces the known set wholesale so partial failures
//! cannot cause drift.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use ws_common::{Channel, WearerId};
use ws_telemetry::{RemovalOutcome, RemovalPolicy};

/// Fixed interval between membership polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(15);

/// What one reconciliation pass did.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub added: Vec<WearerId>,
    pub removed: Vec<WearerId>,
    /// Per-(wearer, channel) removal outcomes for the departed wearers.
    pub removals: Vec<(WearerId, Channel, RemovalOutcome)>,
}

/// Known-wearer set plus poll bookkeeping.
#[derive(Debug)]
pub struct Registry {
    known: BTreeSet<WearerId>,
    last_poll: Instant,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            known: BTreeSet::new(),
            last_poll: Instant::now(),
        }
    }

    /// The wearers the scheduler currently emits for.
    pub fn known(&self) -> &BTreeSet<WearerId> {
        &self.known
    }

    /// Whether the poll interval has elapsed since the last reconciliation.
    pub fn poll_due(&self, now: Instant) -> bool {
        now.duration_since(self.last_poll) >= POLL_INTERVAL
    }

    pub fn mark_polled(&mut self, now: Instant) {
        self.last_poll = now;
    }

    /// Reconcile the known set against a freshly loaded roster.
    ///
    /// Departed wearers get the removal policy applied per active channel;
    /// arrivals get their row files provisioned. The known set is replaced
    /// with `fresh` exactly, not patched incrementally.
    pub fn reconcile(
        &mut self,
        fresh: BTreeSet<WearerId>,
        dirs: &BTreeMap<Channel, PathBuf>,
        policy: RemovalPolicy,
    ) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        report.removed = self.known.difference(&fresh).cloned().collect();
        if !report.removed.is_empty() {
            info!(wearers = ?report.removed, "wearers removed from roster");
            for wearer in &report.removed {
                for (channel, dir) in dirs {
                    let outcome = ws_telemetry::remove(dir, wearer, policy);
                    report.removals.push((wearer.clone(), *channel, outcome));
                }
            }
        }

        report.added = fresh.difference(&self.known).cloned().collect();
        if !report.added.is_empty() {
            info!(wearers = ?report.added, "new wearers discovered");
            for wearer in &report.added {
                for (channel, dir) in dirs {
                    if let Err(e) = ws_telemetry::ensure_ready(dir, wearer) {
                        warn!(%wearer, %channel, error = %e, "failed to provision row file");
                    }
                }
            }
        }

        self.known = fresh;
        report
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_deadline_respects_interval() {
        let registry = Registry::new();
        let start = registry.last_poll;
        assert!(!registry.poll_due(start + Duration::from_secs(14)));
        assert!(registry.poll_due(start + POLL_INTERVAL));
        assert!(registry.poll_due(start + Duration::from_secs(60)));
    }

    #[test]
    fn known_set_is_replaced_wholesale() {
        let mut registry = Registry::new();
        let dirs = BTreeMap::new();
        let fresh = BTreeSet::from([WearerId::new("1"), WearerId::new("2")]);
        registry.reconcile(fresh.clone(), &dirs, RemovalPolicy::default());
        assert_eq!(registry.known(), &fresh);

        let next = BTreeSet::from([WearerId::new("2"), WearerId::new("3")]);
        let report = registry.reconcile(next.clone(), &dirs, RemovalPolicy::default());
        assert_eq!(report.removed, vec![WearerId::new("1")]);
        assert_eq!(report.added, vec![WearerId::new("3")]);
        assert_eq!(registry.known(), &next);
    }

    #[test]
    fn empty_roster_removes_everyone() {
        let mut registry = Registry::new();
        let dirs = BTreeMap::new();
        registry.reconcile(
            BTreeSet::from([WearerId::new("1")]),
            &dirs,
            RemovalPolicy::default(),
        );
        let report = registry.reconcile(BTreeSet::new(), &dirs, RemovalPolicy::default());
        assert_eq!(report.removed, vec![WearerId::new("1")]);
        assert!(registry.known().is_empty());
    }
}
