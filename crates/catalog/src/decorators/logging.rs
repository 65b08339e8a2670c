//! Logging product repository decorator.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Instant;

use catalog_core::product::Product;
use catalog_core::storage::{Operation, ProductRepository, Result};

use super::ResultSize;

/// Records every call with `tracing` and returns the decoratee's result
/// untouched.
///
/// Emits a `debug` event when a call starts and when it succeeds (with
/// `elapsed_ms`, plus `count` for lists). Failures are logged at `warn` for
/// transport errors and `debug` otherwise, tagged with `error_kind`.
pub struct LoggingProductRepository<R: ?Sized> {
    repository: Arc<R>,
    layer: &'static str,
}

impl<R> LoggingProductRepository<R>
where
    R: ProductRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::named(repository, "repository")
    }

    /// Tags every event with `layer`, to tell apart several logging
    /// decorators in one pipeline.
    pub fn named(repository: Arc<R>, layer: &'static str) -> Self {
        Self { repository, layer }
    }

    async fn observe<T, Fut>(&self, operation: Operation, id: Option<&str>, call: Fut) -> Result<T>
    where
        T: ResultSize,
        Fut: Future<Output = Result<T>>,
    {
        let layer = self.layer;
        let product_id = id.unwrap_or("-");
        tracing::debug!(layer, %operation, product_id, "Repository call started");

        let start = Instant::now();
        let result = call.await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match &result {
            Ok(value) => match value.result_size() {
                Some(count) => tracing::debug!(
                    layer,
                    %operation,
                    product_id,
                    elapsed_ms,
                    count,
                    "Repository call succeeded"
                ),
                None => tracing::debug!(
                    layer,
                    %operation,
                    product_id,
                    elapsed_ms,
                    "Repository call succeeded"
                ),
            },
            Err(err) if err.is_transient() => tracing::warn!(
                layer,
                %operation,
                product_id,
                elapsed_ms,
                error_kind = err.kind(),
                error = %err,
                "Repository call failed"
            ),
            Err(err) => tracing::debug!(
                layer,
                %operation,
                product_id,
                elapsed_ms,
                error_kind = err.kind(),
                error = %err,
                "Repository call failed"
            ),
        }

        result
    }
}

#[async_trait]
impl<R> ProductRepository for LoggingProductRepository<R>
where
    R: ProductRepository + ?Sized,
{
    async fn get_product(&self, id: &str) -> Result<Product> {
        self.observe(Operation::Get, Some(id), self.repository.get_product(id))
            .await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.observe(Operation::List, None, self.repository.list_products())
            .await
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        self.observe(
            Operation::Create,
            Some(&product.id),
            self.repository.create_product(product),
        )
        .await
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        self.observe(
            Operation::Update,
            Some(&product.id),
            self.repository.update_product(product),
        )
        .await
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        self.observe(Operation::Delete, Some(id), self.repository.delete_product(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    use catalog_core::storage::RepositoryError;

    use crate::decorators::testing::{transport_error, MockRepository};

    /// Collects formatted log output.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture() -> (Captured, tracing::subscriber::DefaultGuard) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (captured, guard)
    }

    fn widget() -> Product {
        Product::new("P1", "Widget", 9.99)
    }

    #[tokio::test]
    async fn test_results_are_unchanged() {
        let plain = Arc::new(MockRepository::with_products([widget()]));
        let inner = Arc::new(MockRepository::with_products([widget()]));
        let logged = LoggingProductRepository::new(inner.clone());

        assert_eq!(
            logged.get_product("P1").await,
            plain.get_product("P1").await
        );
        assert_eq!(
            logged.get_product("nope").await,
            plain.get_product("nope").await
        );
        assert_eq!(
            logged.list_products().await,
            plain.list_products().await
        );
        assert_eq!(
            logged.create_product(&widget()).await,
            plain.create_product(&widget()).await
        );
        assert_eq!(
            logged.delete_product("P1").await,
            plain.delete_product("P1").await
        );
        assert_eq!(inner.calls(), plain.calls());
    }

    #[tokio::test]
    async fn test_errors_pass_through_verbatim() {
        let inner = Arc::new(MockRepository::new());
        inner.fail_always(transport_error());
        let logged = LoggingProductRepository::new(inner.clone());

        assert_eq!(logged.update_product(&widget()).await, Err(transport_error()));
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test]
    async fn test_logs_success_with_count() {
        let (captured, _guard) = capture();
        let inner = Arc::new(MockRepository::with_products([widget()]));
        let logged = LoggingProductRepository::named(inner, "outer");

        logged.list_products().await.unwrap();

        let output = captured.contents();
        assert!(output.contains("Repository call started"), "{output}");
        assert!(output.contains("Repository call succeeded"), "{output}");
        assert!(output.contains("layer=\"outer\""), "{output}");
        assert!(output.contains("operation=list"), "{output}");
        assert!(output.contains("count=1"), "{output}");
    }

    #[tokio::test]
    async fn test_logs_failure_kind() {
        let (captured, _guard) = capture();
        let inner = Arc::new(MockRepository::new());
        let logged = LoggingProductRepository::new(inner);

        let result = logged.get_product("missing").await;

        assert_eq!(result, Err(RepositoryError::product_not_found("missing")));
        let output = captured.contents();
        assert!(output.contains("Repository call failed"), "{output}");
        assert!(output.contains("error_kind=\"not_found\""), "{output}");
        assert!(output.contains("product_id=\"missing\""), "{output}");
    }
}
