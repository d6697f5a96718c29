//! Cache Settings Module
//!
//! The configuration triple of the cache and the lenient options used to
//! change it.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

/// Default maximum number of entries before an eviction sweep triggers
pub const DEFAULT_CAPACITY: usize = 100;

/// Default entry lifetime in milliseconds (2 minutes)
pub const DEFAULT_LIFETIME_MS: u64 = 2 * 60 * 1000;

/// Default number of oldest entries removed by one eviction sweep
pub const DEFAULT_CLEANING_THRESHOLD: usize = 25;

// == Cache Settings ==
/// Active configuration of an [`ExpiringCache`](crate::cache::ExpiringCache).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Entry count at which the next insert triggers an eviction sweep
    pub capacity: usize,
    /// Duration after which an entry is considered stale
    pub lifetime: Duration,
    /// Number of oldest entries removed by one eviction sweep
    pub cleaning_threshold: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            lifetime: Duration::from_millis(DEFAULT_LIFETIME_MS),
            cleaning_threshold: DEFAULT_CLEANING_THRESHOLD,
        }
    }
}

impl CacheSettings {
    // == Apply ==
    /// Overrides every field present in `options`.
    ///
    /// Zero values are not positive and leave the field untouched.
    pub fn apply(&mut self, options: &CacheOptions) {
        if let Some(capacity) = options.capacity.filter(|&n| n > 0) {
            self.capacity = capacity;
        }
        if let Some(lifetime_ms) = options.lifetime_ms.filter(|&n| n > 0) {
            self.lifetime = Duration::from_millis(lifetime_ms);
        }
        if let Some(threshold) = options.cleaning_threshold.filter(|&n| n > 0) {
            self.cleaning_threshold = threshold;
        }
    }

    /// Returns a copy of these settings with `options` applied.
    pub fn with(mut self, options: &CacheOptions) -> Self {
        self.apply(options);
        self
    }

    /// Serializable view of the settings.
    pub fn view(&self) -> SettingsView {
        SettingsView {
            capacity: self.capacity,
            lifetime_ms: self.lifetime.as_millis() as u64,
            cleaning_threshold: self.cleaning_threshold,
        }
    }
}

/// JSON shape of [`CacheSettings`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SettingsView {
    pub capacity: usize,
    pub lifetime_ms: u64,
    pub cleaning_threshold: usize,
}

// == Cache Options ==
/// Optional overrides passed to [`ExpiringCache::configure`](crate::cache::ExpiringCache::configure).
///
/// `None` means "keep whatever is currently active".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheOptions {
    pub capacity: Option<usize>,
    pub lifetime_ms: Option<u64>,
    pub cleaning_threshold: Option<usize>,
}

impl CacheOptions {
    /// Reads options out of an arbitrary JSON value.
    ///
    /// Recognized keys are `capacity`, `lifetime` (milliseconds) and
    /// `cleaningThreshold` (`cleaning_threshold` is accepted too). Numbers
    /// written in float form count when they are whole (`10.0`, `1e1`).
    /// Anything that is not a positive whole number is dropped without
    /// complaint, as is any input that is not a JSON object.
    pub fn from_json(value: &Value) -> Self {
        Self {
            capacity: positive_int(value, &["capacity"]).map(|n| n as usize),
            lifetime_ms: positive_int(value, &["lifetime"]),
            cleaning_threshold: positive_int(value, &["cleaningThreshold", "cleaning_threshold"])
                .map(|n| n as usize),
        }
    }

    /// True when no field would change anything.
    pub fn is_empty(&self) -> bool {
        self.capacity.is_none() && self.lifetime_ms.is_none() && self.cleaning_threshold.is_none()
    }
}

fn positive_int(value: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find_map(whole_number)
        .filter(|&n| n > 0)
}

fn whole_number(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n > 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64)
            .map(|n| n as u64)
    })
}
