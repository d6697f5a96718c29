//! Cache Store Module
//!
//! Bounded, time-expiring cache. Entries live in insertion order in a
//! `VecDeque`; lookups scan it with a caller-supplied predicate, inserts
//! trigger a batch eviction of the oldest entries once capacity is reached.

use std::collections::VecDeque;
use std::time::Instant;

use tracing::debug;

use crate::cache::{CacheEntry, CacheOptions, CacheSettings, CacheStats};

// == Expiring Cache ==
/// In-memory cache with lazy expiry and batch eviction.
///
/// Oldest entries sit at the front, newest at the back. Entries are never
/// reordered: they leave either from the front (eviction sweep) or one at a
/// time from wherever a lookup found them stale.
#[derive(Debug)]
pub struct ExpiringCache<T> {
    /// Stored entries, oldest first
    entries: VecDeque<CacheEntry<T>>,
    /// Active configuration
    settings: CacheSettings,
    /// Performance statistics
    stats: CacheStats,
}

impl<T: Clone> Default for ExpiringCache<T> {
    fn default() -> Self {
        Self::new(CacheSettings::default())
    }
}

impl<T: Clone> ExpiringCache<T> {
    // == Constructor ==
    /// Creates an empty cache with the given settings.
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            entries: VecDeque::new(),
            settings,
            stats: CacheStats::new(),
        }
    }

    /// Creates an empty cache with defaults overridden by `options`.
    pub fn with_options(options: &CacheOptions) -> Self {
        Self::new(CacheSettings::default().with(options))
    }

    // == Configure ==
    /// Empties the cache and applies any overrides present in `options`.
    ///
    /// Fields left as `None` (or set to zero) keep their current value, so
    /// `configure(&CacheOptions::default())` is a pure reset. Statistics
    /// counters are kept.
    pub fn configure(&mut self, options: &CacheOptions) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.settings.apply(options);
        self.stats.set_total_entries(0);

        debug!(
            dropped,
            capacity = self.settings.capacity,
            lifetime_ms = self.settings.lifetime.as_millis() as u64,
            cleaning_threshold = self.settings.cleaning_threshold,
            "cache configured"
        );
    }

    // == Lookup ==
    /// Returns a copy of the first payload matching `criteria`, if it is
    /// still fresh.
    ///
    /// `equals` is called on each entry from oldest to newest until it
    /// returns true. Only that first match is considered: when it is stale
    /// it is removed and the lookup misses, even if a fresher duplicate sits
    /// further back.
    pub fn lookup<C, F>(&mut self, criteria: &C, equals: F) -> Option<T>
    where
        C: ?Sized,
        F: Fn(&C, &T) -> bool,
    {
        self.lookup_at(criteria, equals, Instant::now())
    }

    pub(crate) fn lookup_at<C, F>(&mut self, criteria: &C, equals: F, now: Instant) -> Option<T>
    where
        C: ?Sized,
        F: Fn(&C, &T) -> bool,
    {
        let Some(index) = self
            .entries
            .iter()
            .position(|entry| equals(criteria, &entry.payload))
        else {
            self.stats.record_miss();
            return None;
        };

        let entry = &self.entries[index];
        if entry.is_fresh_at(self.settings.lifetime, now) {
            self.stats.record_hit();
            return Some(entry.payload.clone());
        }

        self.entries.remove(index);
        self.stats.record_expiration();
        self.stats.set_total_entries(self.entries.len());
        debug!(position = index, "expired cache entry removed on lookup");
        None
    }

    // == Store ==
    /// Stores a copy of `item` at the back of the cache.
    ///
    /// When the cache already holds `capacity` entries, the
    /// `cleaning_threshold` oldest ones are dropped first, fresh or not.
    pub fn store(&mut self, item: &T) {
        self.store_at(item, Instant::now());
    }

    pub(crate) fn store_at(&mut self, item: &T, now: Instant) {
        if self.entries.len() >= self.settings.capacity {
            let swept = self.settings.cleaning_threshold.min(self.entries.len());
            self.entries.drain(..swept);
            self.stats.record_evictions(swept);
            debug!(swept, remaining = self.entries.len(), "cache eviction sweep");
        }

        self.entries.push_back(CacheEntry::stored_at(item.clone(), now));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Accessors ==
    /// Returns the active configuration.
    pub fn settings(&self) -> CacheSettings {
        self.settings
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        description: String,
    }

    impl Item {
        fn new(id: u32) -> Self {
            Self {
                id,
                description: format!("Item #{}", id),
            }
        }
    }

    fn id_equals(criteria: &u32, item: &Item) -> bool {
        *criteria == item.id
    }

    fn filled(options: CacheOptions, ids: std::ops::RangeInclusive<u32>) -> ExpiringCache<Item> {
        let mut cache = ExpiringCache::default();
        cache.configure(&options);
        for id in ids {
            cache.store(&Item::new(id));
        }
        cache
    }

    #[test]
    fn test_cache_new() {
        let cache: ExpiringCache<Item> = ExpiringCache::default();
        assert!(cache.is_empty());
        assert_eq!(cache.settings(), CacheSettings::default());
    }

    #[test]
    fn test_fresh_hit() {
        let mut cache = filled(CacheOptions::default(), 1..=3);

        let item = cache.lookup(&2, id_equals).unwrap();
        assert_eq!(item.id, 2);
        assert_eq!(item.description, "Item #2");
    }

    #[test]
    fn test_absent_is_miss() {
        let mut cache = filled(CacheOptions::default(), 1..=3);

        assert!(cache.lookup(&4, id_equals).is_none());
        assert_eq!(cache.len(), 3, "A plain miss must not touch the store");
    }

    #[test]
    fn test_expired_entry_is_miss_and_removed() {
        let mut cache = filled(
            CacheOptions {
                lifetime_ms: Some(10),
                ..Default::default()
            },
            1..=3,
        );

        sleep(Duration::from_millis(20));

        assert!(cache.lookup(&2, id_equals).is_none());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_batch_eviction() {
        let mut cache = filled(
            CacheOptions {
                capacity: Some(10),
                cleaning_threshold: Some(3),
                ..Default::default()
            },
            1..=11,
        );

        assert_eq!(cache.len(), 8);
        for id in 1..=3 {
            assert!(cache.lookup(&id, id_equals).is_none(), "id {} should be evicted", id);
        }
        for id in 4..=11 {
            assert!(cache.lookup(&id, id_equals).is_some(), "id {} should survive", id);
        }
        assert_eq!(cache.stats().evictions, 3);
    }

    #[test]
    fn test_threshold_larger_than_store_empties_it() {
        let mut cache = filled(
            CacheOptions {
                capacity: Some(2),
                cleaning_threshold: Some(50),
                ..Default::default()
            },
            1..=3,
        );

        assert_eq!(cache.len(), 1);
        assert!(cache.lookup(&3, id_equals).is_some());
        assert_eq!(cache.stats().evictions, 2);
    }

    #[test]
    fn test_configure_without_options_is_pure_reset() {
        let mut cache = filled(
            CacheOptions {
                capacity: Some(10),
                lifetime_ms: Some(5_000),
                cleaning_threshold: Some(3),
            },
            1..=5,
        );
        let before = cache.settings();

        cache.configure(&CacheOptions::default());

        assert!(cache.is_empty());
        assert_eq!(cache.settings(), before);
        assert_eq!(cache.settings().capacity, 10);
    }

    #[test]
    fn test_stored_copy_is_isolated() {
        let mut cache = ExpiringCache::default();
        let mut original = Item::new(1);

        cache.store(&original);
        original.description = "mutated".to_string();

        let cached = cache.lookup(&1, id_equals).unwrap();
        assert_eq!(cached.description, "Item #1");
    }

    #[test]
    fn test_only_first_match_is_considered() {
        let mut cache = ExpiringCache::new(CacheSettings {
            lifetime: Duration::from_millis(100),
            ..Default::default()
        });
        let start = Instant::now();

        cache.store_at(&Item::new(7), start);
        cache.store_at(
            &Item {
                id: 7,
                description: "newer".to_string(),
            },
            start + Duration::from_millis(150),
        );

        // The older duplicate is stale: it gets dropped and the call misses.
        let now = start + Duration::from_millis(200);
        assert!(cache.lookup_at(&7, id_equals, now).is_none());
        assert_eq!(cache.len(), 1);

        // The next call reaches the newer one.
        let hit = cache.lookup_at(&7, id_equals, now).unwrap();
        assert_eq!(hit.description, "newer");
    }

    #[test]
    fn test_lifetime_boundary_is_inclusive() {
        let mut cache = ExpiringCache::new(CacheSettings {
            lifetime: Duration::from_millis(10),
            ..Default::default()
        });
        let start = Instant::now();
        cache.store_at(&Item::new(1), start);

        assert!(cache
            .lookup_at(&1, id_equals, start + Duration::from_millis(10))
            .is_some());
        assert!(cache
            .lookup_at(&1, id_equals, start + Duration::from_millis(11))
            .is_none());
    }

    #[test]
    fn test_stats() {
        let mut cache = filled(CacheOptions::default(), 1..=2);

        cache.lookup(&1, id_equals);
        cache.lookup(&9, id_equals);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 2);
    }

    #[test]
    fn test_predicate_sees_criteria_and_payload() {
        let mut cache = ExpiringCache::default();
        cache.store(&Item::new(3));

        let found = cache.lookup("Item #3", |description: &str, item: &Item| {
            item.description == description
        });
        assert_eq!(found, Some(Item::new(3)));
    }
}
