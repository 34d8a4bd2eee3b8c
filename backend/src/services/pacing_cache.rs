//! Memoization of pacing results between writes.
//!
//! Pacing is cheap but recomputed on every timeline render. The cache keeps
//! the last result per flight for a bounded time; any write touching a
//! flight (definition change or new delivery) must invalidate it.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{FlightId, PacingResult};

/// Upper bound on the TTL (one year).
const MAX_TTL_SECS: u64 = 365 * 24 * 3600;

#[derive(Debug, Clone, Copy)]
struct CachedPacing {
    result: PacingResult,
    computed_at: DateTime<Utc>,
}

/// Entries plus the write counter used to reject results computed before an
/// invalidation.
#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<FlightId, CachedPacing>,
    /// Bumped by every invalidation or clear.
    writes: u64,
    /// Value of `writes` at the last invalidation of each flight.
    invalidated_at: HashMap<FlightId, u64>,
    /// Value of `writes` at the last clear.
    cleared_at: u64,
}

impl CacheState {
    fn invalidate(&mut self, flight_id: FlightId) {
        self.writes += 1;
        self.entries.remove(&flight_id);
        self.invalidated_at.insert(flight_id, self.writes);
    }

    fn is_stale(&self, flight_id: FlightId, generation: u64) -> bool {
        self.cleared_at > generation
            || self
                .invalidated_at
                .get(&flight_id)
                .is_some_and(|&at| at > generation)
    }
}

/// Shared, time-bounded cache of pacing results keyed by flight.
///
/// A reader that computes a result outside the lock takes a
/// [`generation`](Self::generation) before reading the store and stores the
/// result with [`insert_if_current`](Self::insert_if_current); if the flight
/// was invalidated in between, the result is dropped.
#[derive(Clone)]
pub struct PacingCache {
    state: Arc<RwLock<CacheState>>,
    ttl: Duration,
}

impl PacingCache {
    /// Cache whose entries expire `ttl_secs` after being computed.
    /// A TTL of zero disables caching.
    pub fn new(ttl_secs: u64) -> Self {
        let ttl = Duration::seconds(ttl_secs.min(MAX_TTL_SECS) as i64);
        Self {
            state: Arc::new(RwLock::new(CacheState::default())),
            ttl,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.ttl > Duration::zero()
    }

    /// Cached result for `flight_id` if it is still fresh at `now`.
    pub fn get(&self, flight_id: FlightId, now: DateTime<Utc>) -> Option<PacingResult> {
        if !self.is_enabled() {
            return None;
        }
        let state = self.state.read();
        let entry = state.entries.get(&flight_id)?;
        let age = now - entry.computed_at;
        (age >= Duration::zero() && age < self.ttl).then_some(entry.result)
    }

    /// Current write generation. Take it before reading the inputs of a
    /// result that will be passed to [`insert_if_current`](Self::insert_if_current).
    pub fn generation(&self) -> u64 {
        self.state.read().writes
    }

    pub fn insert(&self, flight_id: FlightId, result: PacingResult, computed_at: DateTime<Utc>) {
        if !self.is_enabled() {
            return;
        }
        self.state.write().entries.insert(
            flight_id,
            CachedPacing {
                result,
                computed_at,
            },
        );
    }

    /// Store `result` unless `flight_id` was invalidated (or the cache
    /// cleared) after `generation` was taken. Returns whether it was stored.
    pub fn insert_if_current(
        &self,
        flight_id: FlightId,
        result: PacingResult,
        computed_at: DateTime<Utc>,
        generation: u64,
    ) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let mut state = self.state.write();
        if state.is_stale(flight_id, generation) {
            return false;
        }
        state.entries.insert(
            flight_id,
            CachedPacing {
                result,
                computed_at,
            },
        );
        true
    }

    pub fn invalidate(&self, flight_id: FlightId) {
        self.state.write().invalidate(flight_id);
    }

    pub fn invalidate_many<I: IntoIterator<Item = FlightId>>(&self, flight_ids: I) {
        let mut state = self.state.write();
        for id in flight_ids {
            state.invalidate(id);
        }
    }

    pub fn clear(&self) {
        let mut state = self.state.write();
        state.writes += 1;
        state.cleared_at = state.writes;
        state.entries.clear();
        state.invalidated_at.clear();
    }

    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PacingCache {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CACHE_TTL_SECS)
    }
}
