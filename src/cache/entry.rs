//! Cache Entry Module
//!
//! Defines the unit of storage: a payload stamped with its insertion time.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached payload together with the instant it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored payload (an owned copy of what the caller handed in)
    pub payload: T,
    /// Insertion time
    pub stored_at: Instant,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry stamped with `stored_at`.
    pub fn stored_at(payload: T, stored_at: Instant) -> Self {
        Self { payload, stored_at }
    }

    // == Age ==
    /// Time elapsed between insertion and `now`.
    ///
    /// Saturates to zero if `now` precedes the insertion instant.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry is still servable at `now`.
    ///
    /// Boundary condition: an entry whose age equals `lifetime` exactly is
    /// still fresh. It only goes stale once the age strictly exceeds the
    /// lifetime.
    pub fn is_fresh_at(&self, lifetime: Duration, now: Instant) -> bool {
        self.age_at(now) <= lifetime
    }
}
