//! Cache Module
//!
//! Bounded in-memory cache with lazy, on-read expiry and batch eviction of
//! the oldest entries.

mod entry;
mod settings;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use settings::{
    CacheOptions, CacheSettings, SettingsView, DEFAULT_CAPACITY, DEFAULT_CLEANING_THRESHOLD,
    DEFAULT_LIFETIME_MS,
};
pub use stats::CacheStats;
pub use store::ExpiringCache;
