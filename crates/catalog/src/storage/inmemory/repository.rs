//! In-memory store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use catalog_core::product::Product;
use catalog_core::storage::{LocalStore, ProductRepository, RepositoryError, Result};

/// In-memory product store.
///
/// Cloning is cheap and clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given products.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map = products
            .into_iter()
            .map(|product| (product.id.clone(), product))
            .collect();
        Self {
            products: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Returns true if the store holds no products.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    /// Returns true if a product with this id is stored.
    pub async fn contains(&self, id: &str) -> bool {
        self.products.read().await.contains_key(id)
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn get_product(&self, id: &str) -> Result<Product> {
        let products = self.products.read().await;
        products
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::product_not_found(id))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.id) {
            return Err(RepositoryError::product_conflict(&product.id));
        }
        products.insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(())
            }
            None => Err(RepositoryError::product_not_found(&product.id)),
        }
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        let mut products = self.products.write().await;
        if products.remove(id).is_none() {
            return Err(RepositoryError::product_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl LocalStore for InMemoryStore {
    async fn put_product(&self, product: &Product) -> Result<()> {
        self.products
            .write()
            .await
            .insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn remove_product(&self, id: &str) -> Result<()> {
        self.products.write().await.remove(id);
        Ok(())
    }
}
