//! API Handlers
//!
//! HTTP request handlers for the product service endpoints.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::cache::{CacheOptions, ExpiringCache, SettingsView};
use crate::config::Config;
use crate::db::ProductRepository;
use crate::error::{Result, ServiceError};
use crate::models::{
    is_numeric_id, HealthResponse, Product, ProductKey, ProductQuery, StatsResponse,
};

/// Cache shared between handlers.
pub type SharedCache = Arc<RwLock<ExpiringCache<Product>>>;

/// Application state shared across all handlers.
///
/// Lookups mutate the cache (lazy expiry, stats), so every cache access
/// takes the write lock.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe product cache
    pub cache: SharedCache,
    /// Product database
    pub repository: ProductRepository,
}

impl AppState {
    /// Creates a new AppState from a cache and a repository.
    pub fn new(cache: ExpiringCache<Product>, repository: ProductRepository) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            repository,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the database at `config.database_path` and sizes the cache from
    /// the cache settings.
    pub fn from_config(config: &Config) -> Result<Self> {
        let repository = ProductRepository::open(&config.database_path)?
            .with_default_locale(&config.default_locale);
        let cache = ExpiringCache::with_options(&config.cache_options());
        Ok(Self::new(cache, repository))
    }
}

/// Handler for GET /product/:pid
///
/// Serves the product from cache when a fresh copy for the same id and
/// locale exists, otherwise loads it from the database and caches it.
pub async fn product_handler(
    State(state): State<AppState>,
    Path(pid): Path<String>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Product>> {
    let locale = query.locale_or(state.repository.default_locale());
    let key = ProductKey::new(pid.as_str(), locale);

    // Lock scoped to the lookup; never held across the database call
    let cached = state.cache.write().await.lookup(&key, ProductKey::matches);
    if let Some(product) = cached {
        info!(id = %key.id, locale = %key.locale, "Fetched from cache");
        return Ok(Json(product));
    }

    if !is_numeric_id(&pid) {
        return Err(ServiceError::InvalidRequest("Not a valid ID".to_string()));
    }

    let product = state
        .repository
        .find_product(&key.id, &key.locale)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

    state.cache.write().await.store(&product);
    info!(id = %key.id, locale = %key.locale, "Fetched from database");

    Ok(Json(product))
}

/// Handler for PUT /cache/config
///
/// Resets the cache and applies whichever of `capacity`, `lifetime` and
/// `cleaningThreshold` are positive whole numbers. Everything else in the
/// body is ignored. A body that is not JSON is a 400 with the usual
/// `{"message": ...}` shape.
pub async fn configure_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<SettingsView>> {
    let Json(body) = payload?;
    let options = CacheOptions::from_json(&body);

    let mut cache = state.cache.write().await;
    cache.configure(&options);
    let settings = cache.settings();
    info!(
        capacity = settings.capacity,
        lifetime_ms = settings.lifetime.as_millis() as u64,
        cleaning_threshold = settings.cleaning_threshold,
        reconfigured = !options.is_empty(),
        "Cache reset"
    );

    Ok(Json(settings.view()))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    // Acquire read lock for stats
    let cache = state.cache.read().await;
    Json(cache.stats().into())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
