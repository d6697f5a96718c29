//! Product Repository
//!
//! SQLite-backed source of truth for products. Resolves a product's name,
//! stock, price and a localized description with default-locale fallback.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{named_params, params, Connection, OptionalExtension};
use tracing::debug;

use crate::db::schema;
use crate::error::{Result, ServiceError};
use crate::models::Product;

/// Product data written by [`ProductRepository::insert_product`].
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: i64,
    pub name: String,
    pub stock: i64,
    pub price: f64,
    /// `(locale, description)` pairs
    pub descriptions: Vec<(String, String)>,
}

// == Product Repository ==
/// Handle to the product database. Cheap to clone.
///
/// Every query runs on tokio's blocking pool so SQLite I/O never stalls an
/// async worker.
#[derive(Clone)]
pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
    default_locale: Arc<str>,
}

impl ProductRepository {
    /// Opens (or creates) the database file at `path` and ensures the
    /// schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::from_connection(conn)
    }

    /// Opens a private in-memory database with an empty schema.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(schema::CREATE_TABLES)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            default_locale: Arc::from("en"),
        })
    }

    /// Sets the locale whose description is used when the requested one is
    /// missing.
    pub fn with_default_locale(mut self, locale: impl AsRef<str>) -> Self {
        self.default_locale = Arc::from(locale.as_ref());
        self
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Runs `f` against the connection on the blocking pool.
    async fn with_conn<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Connection) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| ServiceError::Internal("database connection lock poisoned".to_string()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| ServiceError::Internal(format!("database task join error: {}", e)))?
    }

    // == Find Product ==
    /// Looks up product `id` for `locale`.
    ///
    /// Returns `Ok(None)` when the product does not exist, has no
    /// default-locale description, or has no stock row.
    pub async fn find_product(&self, id: &str, locale: &str) -> Result<Option<Product>> {
        let id = id.to_string();
        let locale = locale.to_string();
        let default_locale = Arc::clone(&self.default_locale);

        self.with_conn(move |conn| {
            let key = id.trim();

            let name: Option<String> = conn
                .query_row(schema::SELECT_NAME, named_params! { ":id": key }, |row| {
                    row.get(0)
                })
                .optional()?;

            let Some(name) = name else {
                debug!(id = %id, "product name not found");
                return Ok(None);
            };

            let info = conn
                .query_row(
                    schema::SELECT_INFO,
                    named_params! {
                        ":id": key,
                        ":locale": locale.as_str(),
                        ":default_locale": &*default_locale,
                    },
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, i64>(1)?,
                            row.get::<_, f64>(2)?,
                        ))
                    },
                )
                .optional()?;

            if info.is_none() {
                debug!(id = %id, locale = %locale, "product has no description or stock row");
            }

            Ok(info.map(|(description, stock, price)| Product {
                id: id.clone(),
                locale: locale.clone(),
                name,
                description,
                stock,
                price,
            }))
        })
        .await
    }

    // == Insert Product ==
    /// Writes a product with its stock row and localized descriptions in a
    /// single transaction, replacing any existing rows with the same keys.
    pub async fn insert_product(&self, product: &NewProduct) -> Result<()> {
        let product = product.clone();

        self.with_conn(move |conn| {
            let tx = conn.transaction()?;

            tx.execute(schema::INSERT_PRODUCT, params![product.id, product.name])?;
            tx.execute(
                schema::INSERT_STOCK,
                params![product.id, product.stock, product.price],
            )?;
            for (locale, description) in &product.descriptions {
                tx.execute(schema::INSERT_INFO, params![product.id, locale, description])?;
            }

            tx.commit()?;
            Ok(())
        })
        .await
    }
}
