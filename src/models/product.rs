//! Product record and the criteria used to find it in the cache.

use serde::Serialize;

/// A product resolved for one locale.
///
/// `locale` echoes the locale that was asked for, even when the description
/// fell back to the default locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: String,
    pub locale: String,
    pub name: String,
    pub description: String,
    pub stock: i64,
    pub price: f64,
}

/// Cache criteria for a product: its id and the requested locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductKey {
    pub id: String,
    pub locale: String,
}

impl ProductKey {
    pub fn new(id: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            locale: locale.into(),
        }
    }

    /// Equality predicate handed to the cache lookup.
    pub fn matches(&self, product: &Product) -> bool {
        self.id == product.id && self.locale == product.locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, locale: &str) -> Product {
        Product {
            id: id.to_string(),
            locale: locale.to_string(),
            name: "Bike".to_string(),
            description: "Two wheels".to_string(),
            stock: 3,
            price: 99.5,
        }
    }

    #[test]
    fn test_key_matches_id_and_locale() {
        let key = ProductKey::new("2", "pt");

        assert!(key.matches(&product("2", "pt")));
        assert!(!key.matches(&product("2", "en")));
        assert!(!key.matches(&product("3", "pt")));
    }

    #[test]
    fn test_product_serialize() {
        let json = serde_json::to_value(product("1", "en")).unwrap();

        assert_eq!(json["id"], "1");
        assert_eq!(json["locale"], "en");
        assert_eq!(json["stock"], 3);
        assert_eq!(json["price"], 99.5);
    }
}
