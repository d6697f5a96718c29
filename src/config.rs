//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{
    CacheOptions, DEFAULT_CAPACITY, DEFAULT_CLEANING_THRESHOLD, DEFAULT_LIFETIME_MS,
};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Path of the SQLite product database
    pub database_path: String,
    /// Locale used when a request names none, and as description fallback
    pub default_locale: String,
    /// Entry count at which the cache sweeps
    pub cache_capacity: usize,
    /// Cache entry lifetime in milliseconds
    pub cache_lifetime_ms: u64,
    /// Number of oldest entries dropped per sweep
    pub cache_cleaning_threshold: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 8080)
    /// - `DATABASE_PATH` - SQLite database file (default: prod.db)
    /// - `DEFAULT_LOCALE` - Fallback locale (default: en)
    /// - `CACHE_CAPACITY` - Entries before a sweep (default: 100)
    /// - `CACHE_LIFETIME_MS` - Entry lifetime in ms (default: 120000)
    /// - `CACHE_CLEANING_THRESHOLD` - Entries dropped per sweep (default: 25)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parsed_var("PORT").unwrap_or(defaults.server_port),
            database_path: non_empty_var("DATABASE_PATH").unwrap_or(defaults.database_path),
            default_locale: non_empty_var("DEFAULT_LOCALE").unwrap_or(defaults.default_locale),
            cache_capacity: parsed_var("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            cache_lifetime_ms: parsed_var("CACHE_LIFETIME_MS")
                .unwrap_or(defaults.cache_lifetime_ms),
            cache_cleaning_threshold: parsed_var("CACHE_CLEANING_THRESHOLD")
                .unwrap_or(defaults.cache_cleaning_threshold),
        }
    }

    /// Cache overrides derived from this configuration.
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            capacity: Some(self.cache_capacity),
            lifetime_ms: Some(self.cache_lifetime_ms),
            cleaning_threshold: Some(self.cache_cleaning_threshold),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            database_path: "prod.db".to_string(),
            default_locale: "en".to_string(),
            cache_capacity: DEFAULT_CAPACITY,
            cache_lifetime_ms: DEFAULT_LIFETIME_MS,
            cache_cleaning_threshold: DEFAULT_CLEANING_THRESHOLD,
        }
    }
}

fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
