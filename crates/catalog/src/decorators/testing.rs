//! Scriptable mock repository shared by the decorator tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use catalog_core::product::Product;
use catalog_core::storage::{Operation, ProductRepository, RepositoryError, Result};

use crate::storage::InMemoryStore;

/// Records every call and can be told to fail before touching its store.
#[derive(Default)]
pub(crate) struct MockRepository {
    store: InMemoryStore,
    calls: Mutex<Vec<Operation>>,
    scripted: Mutex<VecDeque<RepositoryError>>,
    always: Mutex<Option<RepositoryError>>,
}

impl MockRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            store: InMemoryStore::with_products(products),
            ..Self::default()
        }
    }

    /// Fail the next `times` calls with `error`, then behave normally.
    pub(crate) fn fail_next(&self, error: RepositoryError, times: usize) {
        let mut scripted = self.scripted.lock().unwrap();
        for _ in 0..times {
            scripted.push_back(error.clone());
        }
    }

    /// Fail every call with `error`.
    pub(crate) fn fail_always(&self, error: RepositoryError) {
        *self.always.lock().unwrap() = Some(error);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls_for(&self, operation: Operation) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|op| **op == operation)
            .count()
    }

    pub(crate) fn store(&self) -> &InMemoryStore {
        &self.store
    }

    fn enter(&self, operation: Operation) -> Result<()> {
        self.calls.lock().unwrap().push(operation);
        if let Some(error) = self.always.lock().unwrap().clone() {
            return Err(error);
        }
        match self.scripted.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductRepository for MockRepository {
    async fn get_product(&self, id: &str) -> Result<Product> {
        self.enter(Operation::Get)?;
        self.store.get_product(id).await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.enter(Operation::List)?;
        self.store.list_products().await
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        self.enter(Operation::Create)?;
        self.store.create_product(product).await
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        self.enter(Operation::Update)?;
        self.store.update_product(product).await
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        self.enter(Operation::Delete)?;
        self.store.delete_product(id).await
    }
}

pub(crate) fn transport_error() -> RepositoryError {
    catalog_core::storage::TransportError::connection("connection reset").into()
}
