//! Metrics product repository decorator.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Instant;

use catalog_core::product::Product;
use catalog_core::storage::{Operation, ProductRepository, Result};

use super::ResultSize;
use crate::metrics::{MetricsRecorder, OUTCOME_OK};

/// Measures every call into a [`MetricsRecorder`].
///
/// Records one counter increment and the latency per call, labelled by
/// operation and outcome, and the result-size gauge for lists. The
/// decoratee's result is returned untouched.
pub struct MetricsProductRepository<R: ?Sized, M: ?Sized> {
    repository: Arc<R>,
    recorder: Arc<M>,
}

impl<R, M> MetricsProductRepository<R, M>
where
    R: ProductRepository + ?Sized,
    M: MetricsRecorder + ?Sized,
{
    pub fn new(repository: Arc<R>, recorder: Arc<M>) -> Self {
        Self {
            repository,
            recorder,
        }
    }

    async fn measure<T, Fut>(&self, operation: Operation, call: Fut) -> Result<T>
    where
        T: ResultSize,
        Fut: Future<Output = Result<T>>,
    {
        let start = Instant::now();
        let result = call.await;
        let elapsed = start.elapsed();

        let outcome = match &result {
            Ok(value) => {
                if let Some(size) = value.result_size() {
                    self.recorder.record_result_size(operation, size);
                }
                OUTCOME_OK
            }
            Err(err) => err.kind(),
        };
        self.recorder.record_call(operation, outcome, elapsed);

        result
    }
}

#[async_trait]
impl<R, M> ProductRepository for MetricsProductRepository<R, M>
where
    R: ProductRepository + ?Sized,
    M: MetricsRecorder + ?Sized,
{
    async fn get_product(&self, id: &str) -> Result<Product> {
        self.measure(Operation::Get, self.repository.get_product(id))
            .await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.measure(Operation::List, self.repository.list_products())
            .await
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        self.measure(Operation::Create, self.repository.create_product(product))
            .await
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        self.measure(Operation::Update, self.repository.update_product(product))
            .await
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        self.measure(Operation::Delete, self.repository.delete_product(id))
            .await
    }
}
