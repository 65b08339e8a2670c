//! Cached product repository decorator.
//!
//! Wraps a `ProductRepository` with an in-process read-through cache.

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use catalog_core::product::Product;
use catalog_core::storage::{ProductRepository, Result};

/// Cache contents plus a write generation.
///
/// Every confirmed write bumps `generation`. A read-through only populates
/// the cache if no write landed while it was waiting on the decoratee, so a
/// slow read can never resurrect an entry a concurrent delete removed.
struct CacheState {
    entries: LruCache<String, Product>,
    generation: u64,
}

/// Cached product repository decorator.
///
/// - **Reads**: `get_product` is served from the cache when possible; on a
///   miss it delegates and stores the result. `list_products` always
///   delegates and refreshes every returned entry.
/// - **Writes**: delegate first; only on success is the cache updated
///   (create/update) or the entry removed (delete).
///
/// The cache therefore only ever holds confirmed state. It is unbounded by
/// default; [`with_capacity`](Self::with_capacity) adds LRU eviction.
pub struct CachedProductRepository<R: ?Sized> {
    repository: Arc<R>,
    state: Mutex<CacheState>,
}

impl<R> CachedProductRepository<R>
where
    R: ProductRepository + ?Sized,
{
    /// Creates an unbounded cache in front of `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_entries(repository, LruCache::unbounded())
    }

    /// Creates a cache holding at most `capacity` products, evicting the
    /// least recently used.
    pub fn with_capacity(repository: Arc<R>, capacity: NonZeroUsize) -> Self {
        Self::with_entries(repository, LruCache::new(capacity))
    }

    fn with_entries(repository: Arc<R>, entries: LruCache<String, Product>) -> Self {
        Self {
            repository,
            state: Mutex::new(CacheState {
                entries,
                generation: 0,
            }),
        }
    }

    /// Number of cached products.
    pub async fn cached_len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    /// Returns true if `id` is cached. Does not affect LRU order.
    pub async fn is_cached(&self, id: &str) -> bool {
        self.state.lock().await.entries.contains(id)
    }

    /// Drops every cached product.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.generation += 1;
    }

    async fn store_confirmed(&self, product: &Product) {
        let mut state = self.state.lock().await;
        state.entries.put(product.id.clone(), product.clone());
        state.generation += 1;
    }
}

#[async_trait]
impl<R> ProductRepository for CachedProductRepository<R>
where
    R: ProductRepository + ?Sized,
{
    async fn get_product(&self, id: &str) -> Result<Product> {
        let generation = {
            let mut state = self.state.lock().await;
            if let Some(product) = state.entries.get(id) {
                tracing::trace!(product_id = %id, "Cache hit for product");
                return Ok(product.clone());
            }
            state.generation
        };

        tracing::trace!(product_id = %id, "Cache miss for product");
        let product = self.repository.get_product(id).await?;

        let mut state = self.state.lock().await;
        if state.generation == generation {
            state.entries.put(product.id.clone(), product.clone());
        } else {
            tracing::trace!(product_id = %id, "Skipping cache fill after concurrent write");
        }

        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let generation = self.state.lock().await.generation;

        let products = self.repository.list_products().await?;

        let mut state = self.state.lock().await;
        if state.generation == generation {
            for product in &products {
                state.entries.put(product.id.clone(), product.clone());
            }
        }
        tracing::trace!(count = products.len(), "Refreshed cache from product list");

        Ok(products)
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        self.repository.create_product(product).await?;
        self.store_confirmed(product).await;
        tracing::debug!(product_id = %product.id, "Cached created product");
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        self.repository.update_product(product).await?;
        self.store_confirmed(product).await;
        tracing::debug!(product_id = %product.id, "Cached updated product");
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        self.repository.delete_product(id).await?;

        let mut state = self.state.lock().await;
        state.entries.pop(id);
        state.generation += 1;
        tracing::debug!(product_id = %id, "Evicted deleted product from cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::storage::{Operation, RepositoryError};

    use crate::decorators::testing::{transport_error, MockRepository};

    fn widget() -> Product {
        Product::new("P1", "Widget", 9.99)
    }

    #[tokio::test]
    async fn test_get_product_cache_miss_populates() {
        let repo = Arc::new(MockRepository::with_products([widget()]));
        let cached = CachedProductRepository::new(repo.clone());

        let result = cached.get_product("P1").await.unwrap();

        assert_eq!(result, widget());
        assert_eq!(repo.calls_for(Operation::Get), 1);
        assert!(cached.is_cached("P1").await);
    }

    #[tokio::test]
    async fn test_get_product_cache_hit() {
        let repo = Arc::new(MockRepository::with_products([widget()]));
        let cached = CachedProductRepository::new(repo.clone());

        let _ = cached.get_product("P1").await.unwrap();
        let result = cached.get_product("P1").await.unwrap();

        assert_eq!(result, widget());
        assert_eq!(repo.calls_for(Operation::Get), 1); // Still 1
    }

    #[tokio::test]
    async fn test_get_missing_propagates_not_found_and_caches_nothing() {
        let repo = Arc::new(MockRepository::new());
        let cached = CachedProductRepository::new(repo.clone());

        let result = cached.get_product("missing").await;

        assert_eq!(result, Err(RepositoryError::product_not_found("missing")));
        assert_eq!(cached.cached_len().await, 0);
    }

    #[tokio::test]
    async fn test_list_always_delegates_and_fills_entries() {
        let repo = Arc::new(MockRepository::with_products([
            widget(),
            Product::new("P2", "Gadget", 3.0),
        ]));
        let cached = CachedProductRepository::new(repo.clone());

        cached.list_products().await.unwrap();
        cached.list_products().await.unwrap();
        cached.get_product("P2").await.unwrap();

        assert_eq!(repo.calls_for(Operation::List), 2);
        assert_eq!(repo.calls_for(Operation::Get), 0);
        assert_eq!(cached.cached_len().await, 2);
    }

    #[tokio::test]
    async fn test_create_populates_cache() {
        let repo = Arc::new(MockRepository::new());
        let cached = CachedProductRepository::new(repo.clone());

        cached.create_product(&widget()).await.unwrap();
        let result = cached.get_product("P1").await.unwrap();

        assert_eq!(result, widget());
        assert_eq!(repo.calls_for(Operation::Get), 0);
    }

    #[tokio::test]
    async fn test_failed_create_does_not_touch_cache() {
        let repo = Arc::new(MockRepository::new());
        repo.fail_next(transport_error(), 1);
        let cached = CachedProductRepository::new(repo.clone());

        assert!(cached.create_product(&widget()).await.is_err());

        assert!(!cached.is_cached("P1").await);
    }

    #[tokio::test]
    async fn test_update_replaces_cached_value() {
        let repo = Arc::new(MockRepository::with_products([widget()]));
        let cached = CachedProductRepository::new(repo.clone());
        cached.get_product("P1").await.unwrap();

        let updated = widget().with_price(19.99);
        cached.update_product(&updated).await.unwrap();

        assert_eq!(cached.get_product("P1").await.unwrap(), updated);
        assert_eq!(repo.calls_for(Operation::Get), 1);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_old_value() {
        let repo = Arc::new(MockRepository::with_products([widget()]));
        let cached = CachedProductRepository::new(repo.clone());
        cached.get_product("P1").await.unwrap();

        repo.fail_next(transport_error(), 1);
        assert!(cached.update_product(&widget().with_price(0.5)).await.is_err());

        assert_eq!(cached.get_product("P1").await.unwrap(), widget());
    }

    #[tokio::test]
    async fn test_delete_evicts_and_then_not_found() {
        let repo = Arc::new(MockRepository::with_products([widget()]));
        let cached = CachedProductRepository::new(repo.clone());
        cached.get_product("P1").await.unwrap();

        cached.delete_product("P1").await.unwrap();

        assert!(!cached.is_cached("P1").await);
        assert_eq!(
            cached.get_product("P1").await,
            Err(RepositoryError::product_not_found("P1"))
        );
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let repo = Arc::new(MockRepository::with_products([
            Product::new("a", "A", 1.0),
            Product::new("b", "B", 1.0),
            Product::new("c", "C", 1.0),
        ]));
        let cached = CachedProductRepository::with_capacity(repo.clone(), NonZeroUsize::new(2).unwrap());

        cached.get_product("a").await.unwrap();
        cached.get_product("b").await.unwrap();
        cached.get_product("a").await.unwrap();
        cached.get_product("c").await.unwrap();

        assert_eq!(cached.cached_len().await, 2);
        assert!(cached.is_cached("a").await);
        assert!(!cached.is_cached("b").await);
    }

    #[tokio::test]
    async fn test_concurrent_creates_all_cached() {
        let repo = Arc::new(MockRepository::new());
        let cached = Arc::new(CachedProductRepository::new(repo.clone()));

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let cached = cached.clone();
                tokio::spawn(async move {
                    cached
                        .create_product(&Product::new(format!("P{i}"), "Widget", 1.0))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(cached.cached_len().await, 32);
        assert_eq!(repo.store().len().await, 32);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let repo = Arc::new(MockRepository::with_products([widget()]));
        let cached = CachedProductRepository::new(repo.clone());
        cached.get_product("P1").await.unwrap();

        cached.clear().await;
        cached.get_product("P1").await.unwrap();

        assert_eq!(repo.calls_for(Operation::Get), 2);
    }
}
