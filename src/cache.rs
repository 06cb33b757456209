//! Memoization of aggregate results.
//!
//! Identical parameters always produce identical odds, so caching the
//! aggregate pair is sound — provided the key carries *all* of the
//! parameters. The key here is the full
//! `(dice_sides, target_number, max_rolls)` tuple; a d6 result can
//! never be served for a d8 request.
//!
//! The cache is deliberately unbounded. The practical key space is six
//! die sizes × 100 roll budgets × targets up to 2000, each entry a few
//! dozen bytes; eviction machinery would cost more than it could ever
//! reclaim. It lives as long as its owning
//! [`OddsEngine`](crate::engine::OddsEngine) and is `Mutex`-protected
//! so the engine can be shared across axum handlers and rayon workers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::types::{Odds, TrialParams};

/// Thread-safe map from the full parameter tuple to the aggregate pair,
/// with hit/miss counters so tests can observe that a second identical
/// call never recomputes the table.
#[derive(Debug, Default)]
pub struct OddsCache {
    entries: Mutex<HashMap<TrialParams, Odds>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl OddsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously stored pair, counting the outcome.
    pub fn get(&self, params: &TrialParams) -> Option<Odds> {
        let found = self.entries.lock().unwrap().get(params).copied();
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Store a computed pair. Last write wins on a race; both writers
    /// computed the same value, so the race is benign.
    pub fn insert(&self, params: TrialParams, odds: Odds) {
        self.entries.lock().unwrap().insert(params, odds);
    }

    /// Number of lookups answered from the map.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of lookups that fell through to computation.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of distinct parameter tuples stored.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
