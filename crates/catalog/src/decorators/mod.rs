//! Repository decorators.
//!
//! Each decorator wraps exactly one inner `ProductRepository` (the
//! decoratee) and adds a single concern while implementing the same trait:
//!
//! - [`CachedProductRepository`]: read-through cache of confirmed state
//! - [`OfflineProductRepository`]: local-store routing and write-back
//! - [`RetryingProductRepository`]: bounded retry of transient failures
//! - [`ValidatingProductRepository`]: fail-fast input checks
//! - [`LoggingProductRepository`]: structured call logging
//! - [`MetricsProductRepository`]: latency, counters and list-size gauge
//!
//! # Example
//!
//! ```ignore
//! let remote = Arc::new(HttpProductRepository::new("http://localhost:3000")?);
//! let cached = Arc::new(CachedProductRepository::new(remote));
//! let validated = ValidatingProductRepository::new(Arc::new(RetryingProductRepository::new(
//!     cached,
//!     RetryPolicy::default(),
//! )));
//! ```

mod cached;
mod logging;
mod metrics;
mod offline;
mod retry;
mod validating;

#[cfg(test)]
pub(crate) mod testing;

pub use cached::CachedProductRepository;
pub use logging::LoggingProductRepository;
pub use metrics::MetricsProductRepository;
pub use offline::{FallbackPolicy, OfflineProductRepository};
pub use retry::RetryingProductRepository;
pub use validating::ValidatingProductRepository;

use catalog_core::product::Product;

/// Size of a call's successful result, for list-shaped results only.
pub(crate) trait ResultSize {
    fn result_size(&self) -> Option<usize> {
        None
    }
}

impl ResultSize for () {}

impl ResultSize for Product {}

impl ResultSize for Vec<Product> {
    fn result_size(&self) -> Option<usize> {
        Some(self.len())
    }
}
