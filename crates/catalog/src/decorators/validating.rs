//! Validating product repository decorator.

use std::sync::Arc;

use async_trait::async_trait;

use catalog_core::product::{validate_id, validate_product, Product};
use catalog_core::storage::{ProductRepository, Result};

/// Rejects malformed input before the decoratee is ever called.
///
/// `create_product`/`update_product` run the full product validation;
/// `get_product`/`delete_product` check only that the id is non-empty.
/// `list_products` takes no input and always delegates.
pub struct ValidatingProductRepository<R: ?Sized> {
    repository: Arc<R>,
}

impl<R> ValidatingProductRepository<R>
where
    R: ProductRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ProductRepository for ValidatingProductRepository<R>
where
    R: ProductRepository + ?Sized,
{
    async fn get_product(&self, id: &str) -> Result<Product> {
        validate_id(id)?;
        self.repository.get_product(id).await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.repository.list_products().await
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        if let Err(err) = validate_product(product) {
            tracing::debug!(product_id = %product.id, error = %err, "Rejected product on create");
            return Err(err.into());
        }
        self.repository.create_product(product).await
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        if let Err(err) = validate_product(product) {
            tracing::debug!(product_id = %product.id, error = %err, "Rejected product on update");
            return Err(err.into());
        }
        self.repository.update_product(product).await
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        validate_id(id)?;
        self.repository.delete_product(id).await
    }
}
