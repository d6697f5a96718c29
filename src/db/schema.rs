//! Product database schema and queries.

/// Tables backing the product lookup. Safe to run against an existing file.
pub const CREATE_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS product (
        id   INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS product_info (
        id          INTEGER NOT NULL,
        locale      TEXT NOT NULL,
        description TEXT NOT NULL,
        PRIMARY KEY (id, locale)
    );
    CREATE TABLE IF NOT EXISTS product_stock (
        id    INTEGER PRIMARY KEY,
        stock INTEGER NOT NULL,
        price REAL NOT NULL
    );
";

pub const SELECT_NAME: &str = "SELECT name FROM product WHERE id = :id";

/// Description in the requested locale, falling back to the default locale's
/// row, joined with stock and price. No default-locale row means no result.
pub const SELECT_INFO: &str = "
    SELECT pi.description, ps.stock, ps.price
    FROM (
        SELECT pi_default.id AS id,
               COALESCE(pi_locale.description, pi_default.description) AS description
        FROM (
            SELECT id, description FROM product_info
            WHERE id = :id AND locale = :default_locale
        ) AS pi_default
        LEFT OUTER JOIN (
            SELECT id, description FROM product_info
            WHERE id = :id AND locale = :locale
        ) AS pi_locale ON pi_locale.id = pi_default.id
    ) AS pi
    INNER JOIN product_stock ps ON pi.id = ps.id
";

pub const INSERT_PRODUCT: &str = "INSERT OR REPLACE INTO product (id, name) VALUES (?1, ?2)";

pub const INSERT_STOCK: &str =
    "INSERT OR REPLACE INTO product_stock (id, stock, price) VALUES (?1, ?2, ?3)";

pub const INSERT_INFO: &str =
    "INSERT OR REPLACE INTO product_info (id, locale, description) VALUES (?1, ?2, ?3)";
