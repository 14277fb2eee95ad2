//! Visit ledger shared by every branch of one crawl
//!
//! The ledger is the single synchronization point that keeps two concurrent
//! branches from fetching the same address. Everything else in the crawl is
//! share-nothing.

use std::collections::HashSet;
use std::sync::Mutex;
use url::Url;

/// A concurrency-safe, insert-only set of claimed addresses
///
/// Created at crawl start and discarded when the crawl completes. Entries
/// are never removed.
#[derive(Debug, Default)]
pub struct VisitLedger {
    seen: Mutex<HashSet<Url>>,
}

impl VisitLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims an address for fetching
    ///
    /// Test-and-insert: returns `true` and records the address only when it
    /// was not already present. Across arbitrarily many concurrent callers,
    /// at most one `claim` for a given address ever returns `true`.
    pub fn claim(&self, address: &Url) -> bool {
        self.seen.lock().unwrap().insert(address.clone())
    }

    /// Returns true when the address has already been claimed
    ///
    /// A best-effort pre-filter for fan-out; membership can change between
    /// this check and a later `claim`, which remains the authoritative gate.
    pub fn contains(&self, address: &Url) -> bool {
        self.seen.lock().unwrap().contains(address)
    }
}
