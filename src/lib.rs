//! Product Cache - product lookup service
//!
//! Serves localized product records from SQLite through a bounded,
//! time-expiring in-memory cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheOptions, ExpiringCache};
pub use config::Config;
