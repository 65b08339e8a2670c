//! SQLite store implementation.

use async_trait::async_trait;
use rusqlite::params;
use tokio_rusqlite::Connection;

use catalog_core::product::Product;
use catalog_core::storage::{
    LocalStore, ProductRepository, RepositoryError, Result, TransportError,
};

use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

fn row_to_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
        description: row.get(3)?,
    })
}

/// SQLite-backed local store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a file-based store. The schema is created
    /// automatically.
    pub async fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| TransportError::storage(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Opens an in-memory store; data is lost when it is dropped.
    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| TransportError::storage(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, ""))
    }

    /// Runs a single-row write and returns the number of affected rows.
    async fn execute(&self, sql: &'static str, product: &Product) -> Result<usize> {
        let id = product.id.clone();
        let name = product.name.clone();
        let price = product.price;
        let description = product.description.clone();

        self.conn
            .call(move |conn| {
                conn.execute(sql, params![id, name, price, description])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, &product.id))
    }

    async fn delete(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(schema::DELETE_PRODUCT, params![id_owned])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, id))
    }
}

#[async_trait]
impl ProductRepository for SqliteStore {
    async fn get_product(&self, id: &str) -> Result<Product> {
        let id_owned = id.to_string();

        let found = self
            .conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_PRODUCT_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_owned], row_to_product) {
                    Ok(product) => Ok(Some(product)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, id))?;

        found.ok_or_else(|| RepositoryError::product_not_found(id))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_PRODUCTS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_product).map_err(wrap_err)?;

                let mut products = Vec::new();
                for row_result in rows {
                    products.push(row_result.map_err(wrap_err)?);
                }
                Ok(products)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ""))
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        self.execute(schema::INSERT_PRODUCT, product).await?;
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        match self.execute(schema::UPDATE_PRODUCT, product).await? {
            0 => Err(RepositoryError::product_not_found(&product.id)),
            _ => Ok(()),
        }
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        match self.delete(id).await? {
            0 => Err(RepositoryError::product_not_found(id)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl LocalStore for SqliteStore {
    async fn put_product(&self, product: &Product) -> Result<()> {
        self.execute(schema::UPSERT_PRODUCT, product).await?;
        Ok(())
    }

    async fn remove_product(&self, id: &str) -> Result<()> {
        self.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product::new("P1", "Widget", 9.99).with_description("A widget")
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let store = SqliteStore::open_in_memory().await.unwrap();

        store.create_product(&widget()).await.unwrap();

        assert_eq!(store.get_product("P1").await.unwrap(), widget());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = SqliteStore::open_in_memory().await.unwrap();

        assert_eq!(
            store.get_product("nope").await,
            Err(RepositoryError::product_not_found("nope"))
        );
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        store.create_product(&widget()).await.unwrap();

        assert_eq!(
            store.create_product(&widget()).await,
            Err(RepositoryError::product_conflict("P1"))
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_not_found() {
        let store = SqliteStore::open_in_memory().await.unwrap();

        assert_eq!(
            store.update_product(&widget()).await,
            Err(RepositoryError::product_not_found("P1"))
        );
        assert_eq!(
            store.delete_product("P1").await,
            Err(RepositoryError::product_not_found("P1"))
        );
    }

    #[tokio::test]
    async fn test_put_upserts_and_remove_is_idempotent() {
        let store = SqliteStore::open_in_memory().await.unwrap();

        store.put_product(&widget()).await.unwrap();
        store.put_product(&widget().with_price(1.5)).await.unwrap();
        assert_eq!(store.get_product("P1").await.unwrap().price, 1.5);

        store.remove_product("P1").await.unwrap();
        store.remove_product("P1").await.unwrap();
        assert!(store.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        store
            .create_product(&Product::new("b", "B", 2.0))
            .await
            .unwrap();
        store
            .create_product(&Product::new("a", "A", 1.0))
            .await
            .unwrap();

        let ids: Vec<_> = store
            .list_products()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, ["a", "b"]);
    }
}
