//! Offline-aware product repository decorator.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;

use catalog_core::product::Product;
use catalog_core::storage::{
    Connectivity, LocalStore, ProductRepository, RepositoryError, Result,
};

/// What a connected read does when the primary fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Surface the primary's error unchanged.
    Disabled,
    /// Serve the read from the local store when the primary fails with a
    /// transient error. If the local store cannot answer either, the
    /// primary's error is surfaced.
    #[default]
    LocalOnTransportError,
}

/// Routes calls between a primary repository and a local store depending on
/// connectivity.
///
/// - **Disconnected**: every operation goes to the local store only; the
///   primary is never called. Offline writes are not queued for later sync.
/// - **Connected**: the primary is called first. Successful reads are
///   written back into the local store and successful writes are mirrored
///   there. Write-back is best-effort: its failures are logged and never
///   change the outcome of the call.
///
/// Connectivity is read once at the start of every call.
pub struct OfflineProductRepository<R: ?Sized, L: ?Sized, C: ?Sized> {
    primary: Arc<R>,
    local: Arc<L>,
    connectivity: Arc<C>,
    fallback: FallbackPolicy,
}

impl<R, L, C> OfflineProductRepository<R, L, C>
where
    R: ProductRepository + ?Sized,
    L: LocalStore + ?Sized,
    C: Connectivity + ?Sized,
{
    /// Creates the decorator with the default fallback policy.
    pub fn new(primary: Arc<R>, local: Arc<L>, connectivity: Arc<C>) -> Self {
        Self {
            primary,
            local,
            connectivity,
            fallback: FallbackPolicy::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    fn should_fall_back(&self, error: &RepositoryError) -> bool {
        self.fallback == FallbackPolicy::LocalOnTransportError && error.is_transient()
    }

    async fn write_back(&self, product: &Product) {
        if let Err(err) = self.local.put_product(product).await {
            tracing::warn!(product_id = %product.id, error = %err, "Local write-back failed");
        }
    }

    async fn write_back_all(&self, products: &[Product]) {
        let results = join_all(products.iter().map(|p| self.local.put_product(p))).await;
        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            tracing::warn!(
                failed,
                total = products.len(),
                "Local write-back of product list partially failed"
            );
        }
    }

    /// Try the local store after a primary failure; keep the primary's error
    /// if the local store cannot answer.
    async fn fall_back<T, F>(&self, primary_err: RepositoryError, local_read: F) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
    {
        tracing::warn!(error = %primary_err, "Primary read failed, falling back to local store");
        match local_read.await {
            Ok(value) => Ok(value),
            Err(local_err) => {
                tracing::debug!(error = %local_err, "Local fallback failed");
                Err(primary_err)
            }
        }
    }
}

#[async_trait]
impl<R, L, C> ProductRepository for OfflineProductRepository<R, L, C>
where
    R: ProductRepository + ?Sized,
    L: LocalStore + ?Sized,
    C: Connectivity + ?Sized,
{
    async fn get_product(&self, id: &str) -> Result<Product> {
        if !self.connectivity.is_connected() {
            tracing::debug!(product_id = %id, "Offline, reading product from local store");
            return self.local.get_product(id).await;
        }

        match self.primary.get_product(id).await {
            Ok(product) => {
                self.write_back(&product).await;
                Ok(product)
            }
            Err(err) if self.should_fall_back(&err) => {
                self.fall_back(err, self.local.get_product(id)).await
            }
            Err(err) => Err(err),
        }
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        if !self.connectivity.is_connected() {
            tracing::debug!("Offline, listing products from local store");
            return self.local.list_products().await;
        }

        match self.primary.list_products().await {
            Ok(products) => {
                self.write_back_all(&products).await;
                Ok(products)
            }
            Err(err) if self.should_fall_back(&err) => {
                self.fall_back(err, self.local.list_products()).await
            }
            Err(err) => Err(err),
        }
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        if !self.connectivity.is_connected() {
            tracing::debug!(product_id = %product.id, "Offline, creating product locally");
            return self.local.create_product(product).await;
        }

        self.primary.create_product(product).await?;
        self.write_back(product).await;
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        if !self.connectivity.is_connected() {
            tracing::debug!(product_id = %product.id, "Offline, updating product locally");
            return self.local.update_product(product).await;
        }

        self.primary.update_product(product).await?;
        self.write_back(product).await;
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        if !self.connectivity.is_connected() {
            tracing::debug!(product_id = %id, "Offline, deleting product locally");
            return self.local.delete_product(id).await;
        }

        self.primary.delete_product(id).await?;
        if let Err(err) = self.local.remove_product(id).await {
            tracing::warn!(product_id = %id, error = %err, "Local delete mirror failed");
        }
        Ok(())
    }
}
