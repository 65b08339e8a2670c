//! SQLite schema definitions and SQL query constants.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    price REAL NOT NULL,
    description TEXT
);
"#;

pub const SELECT_PRODUCT_BY_ID: &str = r#"
SELECT id, name, price, description
FROM products
WHERE id = ?1
"#;

pub const SELECT_ALL_PRODUCTS: &str = r#"
SELECT id, name, price, description
FROM products
ORDER BY id
"#;

pub const INSERT_PRODUCT: &str = r#"
INSERT INTO products (id, name, price, description)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const UPDATE_PRODUCT: &str = r#"
UPDATE products
SET name = ?2, price = ?3, description = ?4
WHERE id = ?1
"#;

pub const UPSERT_PRODUCT: &str = r#"
INSERT INTO products (id, name, price, description)
VALUES (?1, ?2, ?3, ?4)
ON CONFLICT(id) DO UPDATE SET
    name = excluded.name,
    price = excluded.price,
    description = excluded.description
"#;

pub const DELETE_PRODUCT: &str = r#"
DELETE FROM products
WHERE id = ?1
"#;
