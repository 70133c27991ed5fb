//! Wearer identity with a stable per-process waveform seed.
//!
//! A wearer id is an opaque string token. It doubles as a file-naming key
//! and as the seed source that desynchronizes waveform phase and bias
//! between wearers. Numeric ids seed directly; anything else is hashed to a
//! bounded integer. The seed is computed once at construction, so the same
//! identity always carries the same seed for the life of the process.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Upper bound for hash-derived seeds. Numeric ids are used as-is.
const HASH_SEED_MODULUS: u64 = 10_000_000;

/// Opaque wearer identity and its derived waveform seed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WearerId {
    id: String,
    seed: u64,
}

impl WearerId {
    /// Create an identity, deriving its seed.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let seed = derive_seed(&id);
        WearerId { id, seed }
    }

    /// The raw identity token, used for file naming.
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// The derived numeric seed for waveform phase and bias.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl fmt::Display for WearerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl From<&str> for WearerId {
    fn from(id: &str) -> Self {
        WearerId::new(id)
    }
}

/// Numeric ids parse directly; non-numeric ids hash to a bounded integer.
///
/// Stability is only promised within one process run, not across builds.
fn derive_seed(id: &str) -> u64 {
    if let Ok(n) = id.trim().parse::<u64>() {
        return n;
    }
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    hasher.finish() % HASH_SEED_MODULUS
}
