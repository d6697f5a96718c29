//! Request and Response models for the product API
//!
//! This module defines the product record, its cache criteria and the DTOs
//! used for serializing/deserializing HTTP requests and responses.

pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use product::{Product, ProductKey};
pub use requests::{is_numeric_id, ProductQuery};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
