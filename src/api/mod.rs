//! API Module
//!
//! HTTP handlers and routing for the product service.
//!
//! # Endpoints
//! - `GET /product/:pid` - Look up a product, optionally `?locale=xx`
//! - `PUT /cache/config` - Reset and reconfigure the product cache
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
