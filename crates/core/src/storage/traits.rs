use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::product::Product;

use super::Result;

/// Repository for product operations.
///
/// Every layer of the pipeline implements this capability: the remote
/// source, the local stores, and each decorator wrapping one of them.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Gets a product by its id. Fails with `NotFound` if absent.
    async fn get_product(&self, id: &str) -> Result<Product>;

    /// Gets a snapshot of all products. An empty list is not an error.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Creates a new product. Fails with `Conflict` if the id already exists.
    async fn create_product(&self, product: &Product) -> Result<()>;

    /// Updates an existing product. Fails with `NotFound` if absent.
    async fn update_product(&self, product: &Product) -> Result<()>;

    /// Deletes a product by its id. Fails with `NotFound` if absent.
    async fn delete_product(&self, id: &str) -> Result<()>;
}

#[async_trait]
impl<T: ProductRepository + ?Sized> ProductRepository for Arc<T> {
    async fn get_product(&self, id: &str) -> Result<Product> {
        (**self).get_product(id).await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        (**self).list_products().await
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        (**self).create_product(product).await
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        (**self).update_product(product).await
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        (**self).delete_product(id).await
    }
}

#[async_trait]
impl<T: ProductRepository + ?Sized> ProductRepository for Box<T> {
    async fn get_product(&self, id: &str) -> Result<Product> {
        (**self).get_product(id).await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        (**self).list_products().await
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        (**self).create_product(product).await
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        (**self).update_product(product).await
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        (**self).delete_product(id).await
    }
}

/// A local product store usable as an offline mirror.
///
/// On top of the strict repository operations, a local store offers
/// lenient writes used for write-back: `put_product` inserts or replaces,
/// `remove_product` succeeds whether or not the id was present.
/// Implementations never perform network I/O.
#[async_trait]
pub trait LocalStore: ProductRepository {
    /// Inserts or replaces a product.
    async fn put_product(&self, product: &Product) -> Result<()>;

    /// Removes a product if present.
    async fn remove_product(&self, id: &str) -> Result<()>;
}

/// Answers whether the remote is currently reachable.
///
/// Consulted on every call; implementations must be cheap.
pub trait Connectivity: Send + Sync {
    fn is_connected(&self) -> bool;
}

impl<T: Connectivity + ?Sized> Connectivity for Arc<T> {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}

/// The five repository operations, used as log and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Get,
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Get,
        Operation::List,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
