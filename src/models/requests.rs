//! Request DTOs for the product API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

/// Query string of `GET /product/:pid`
///
/// # Fields
/// - `locale`: Optional locale code; the configured default applies when
///   absent or empty
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub locale: Option<String>,
}

impl ProductQuery {
    /// Returns the requested locale, or `default` when none was given.
    pub fn locale_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.locale
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(default)
    }
}

/// Checks that a product id looks like a number.
///
/// Anything parsing as a finite float is accepted ("2", " 2 ", "2.0").
pub fn is_numeric_id(id: &str) -> bool {
    id.trim().parse::<f64>().map(f64::is_finite).unwrap_or(false)
}
