//! Database Module
//!
//! Relational source of truth consulted on cache misses.

mod repository;
mod schema;

pub use repository::{NewProduct, ProductRepository};
