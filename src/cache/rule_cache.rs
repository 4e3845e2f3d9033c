//! Time-bounded cache for mined rule sets.
//!
//! Holds at most one rule set, tagged with the fingerprint of the snapshot it
//! was mined from. An entry is served only while the fingerprint matches and
//! the entry is younger than the TTL, so a changed bookmark table always
//! triggers a re-mine.

use crate::mining::RuleSet;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    fingerprint: u64,
    rules: Arc<RuleSet>,
    inserted_at: Instant,
}

/// A thread-safe, single-slot rule cache.
///
/// Clones share the same slot. Inserting swaps the whole entry, so readers
/// never see a partially updated rule set.
#[derive(Clone)]
pub struct RuleCache {
    slot: Arc<RwLock<Option<CacheEntry>>>,
    ttl: Duration,
}

impl RuleCache {
    /// Create a cache whose entries live for `ttl_seconds`. Zero disables it.
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Rules for `fingerprint`, if cached and still fresh.
    pub fn get(&self, fingerprint: u64) -> Option<Arc<RuleSet>> {
        if !self.is_enabled() {
            return None;
        }

        let now = Instant::now();
        if let Ok(slot) = self.slot.read() {
            if let Some(entry) = slot.as_ref() {
                if entry.fingerprint == fingerprint
                    && now.duration_since(entry.inserted_at) < self.ttl
                {
                    return Some(entry.rules.clone());
                }
            }
        }

        None
    }

    /// Replace the cached entry.
    pub fn insert(&self, fingerprint: u64, rules: Arc<RuleSet>) {
        if !self.is_enabled() {
            return;
        }

        let entry = CacheEntry {
            fingerprint,
            rules,
            inserted_at: Instant::now(),
        };

        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(entry);
        }
    }

    /// Drop the cached entry.
    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }

    /// How old the cached entry is, if there is one (expired or not).
    pub fn age(&self) -> Option<Duration> {
        self.slot
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|entry| entry.inserted_at.elapsed()))
    }

    /// Fingerprint of the cached entry, if any.
    pub fn fingerprint(&self) -> Option<u64> {
        self.slot
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|entry| entry.fingerprint))
    }

    /// Longest time a cached rule set can be served.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl std::fmt::Debug for RuleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleCache")
            .field("ttl", &self.ttl)
            .field("fingerprint", &self.fingerprint())
            .field("age", &self.age())
            .finish()
    }
}
