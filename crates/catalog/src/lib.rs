//! catalog - a composable, resilient product repository pipeline.
//!
//! A [`ProductRepository`](catalog_core::storage::ProductRepository) leaf
//! (the HTTP remote or a local store) is wrapped by decorators that each add
//! one concern while keeping the same capability:
//!
//! ```text
//! Metrics(Logging(Validating(Retry(Offline(Caching(Remote), Local, Connectivity)))))
//! ```
//!
//! [`pipeline::PipelineBuilder`] assembles that stack in its fixed order.

pub mod cli;
pub mod config;
pub mod connectivity;
pub mod decorators;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod storage;

pub use catalog_core::product::Product;
pub use catalog_core::storage::{
    Connectivity, LocalStore, Operation, ProductRepository, RepositoryError, Result,
};
pub use config::Config;
pub use connectivity::ConnectivityFlag;
pub use metrics::{InMemoryMetrics, MetricsRecorder, MetricsSnapshot};
pub use pipeline::PipelineBuilder;
