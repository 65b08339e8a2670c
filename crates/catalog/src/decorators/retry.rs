//! Retrying product repository decorator.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use catalog_core::product::Product;
use catalog_core::retry::RetryPolicy;
use catalog_core::storage::{Operation, ProductRepository, Result};

/// Re-invokes the decoratee when it fails with a transient error.
///
/// At most `policy.max_attempts` calls are made per operation; after that
/// the last error is returned. Not-found, conflict and validation errors are
/// returned immediately. Delays use `tokio::time::sleep`, so a waiting retry
/// only suspends its own task, and dropping the returned future cancels both
/// the pending delay and any in-flight attempt.
///
/// `create_product` is retried like everything else. If an attempt timed out
/// after the remote had already stored the product, the next attempt
/// answers `Conflict`.
pub struct RetryingProductRepository<R: ?Sized> {
    repository: Arc<R>,
    policy: RetryPolicy,
}

impl<R> RetryingProductRepository<R>
where
    R: ProductRepository + ?Sized,
{
    pub fn new(repository: Arc<R>, policy: RetryPolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn delay_after(&self, attempt: u32) -> Duration {
        let delay = self.policy.delay_for(attempt);
        if !self.policy.jitter {
            return delay;
        }
        let half = (delay.as_millis() / 2) as u64;
        delay + Duration::from_millis(rand::rng().random_range(0..=half))
    }

    async fn run<T, F, Fut>(&self, operation: Operation, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.policy.attempts();
        let mut attempt = 1;

        loop {
            match call().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::debug!(%operation, attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    let delay = self.delay_after(attempt);
                    tracing::warn!(
                        %operation,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    if err.is_transient() {
                        tracing::warn!(%operation, attempts = attempt, error = %err, "Giving up");
                    }
                    return Err(err);
                }
            }
        }
    }
}

#[async_trait]
impl<R> ProductRepository for RetryingProductRepository<R>
where
    R: ProductRepository + ?Sized,
{
    async fn get_product(&self, id: &str) -> Result<Product> {
        self.run(Operation::Get, || self.repository.get_product(id))
            .await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.run(Operation::List, || self.repository.list_products())
            .await
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        self.run(Operation::Create, || self.repository.create_product(product))
            .await
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        self.run(Operation::Update, || self.repository.update_product(product))
            .await
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        self.run(Operation::Delete, || self.repository.delete_product(id))
            .await
    }
}
