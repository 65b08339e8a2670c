//! Pipeline composition.
//!
//! [`PipelineBuilder`] takes the remote leaf plus whichever layers are
//! wanted and always nests them in the same order:
//!
//! ```text
//! Metrics(Logging(Validating(Retry(Offline(Caching(Remote), Local, Connectivity)))))
//! ```
//!
//! Validation sits outside retry so malformed input never costs a network
//! round trip; metrics and logging sit outermost so their latency includes
//! every retry. Layers that were not requested are skipped.

use std::num::NonZeroUsize;
use std::sync::Arc;

use catalog_core::retry::RetryPolicy;
use catalog_core::storage::{Connectivity, LocalStore, ProductRepository, Result};

use crate::config::Config;
use crate::decorators::{
    CachedProductRepository, FallbackPolicy, LoggingProductRepository, MetricsProductRepository,
    OfflineProductRepository, RetryingProductRepository, ValidatingProductRepository,
};
use crate::metrics::MetricsRecorder;
use crate::storage::HttpProductRepository;

struct OfflineLayer {
    local: Arc<dyn LocalStore>,
    connectivity: Arc<dyn Connectivity>,
    fallback: FallbackPolicy,
}

/// Assembles a repository pipeline in its fixed layer order.
pub struct PipelineBuilder {
    remote: Arc<dyn ProductRepository>,
    cache: Option<Option<NonZeroUsize>>,
    offline: Option<OfflineLayer>,
    retry: Option<RetryPolicy>,
    validate: bool,
    log: bool,
    metrics: Option<Arc<dyn MetricsRecorder>>,
}

impl PipelineBuilder {
    /// Starts a pipeline around `remote` with no layers.
    pub fn new(remote: Arc<dyn ProductRepository>) -> Self {
        Self {
            remote,
            cache: None,
            offline: None,
            retry: None,
            validate: false,
            log: false,
            metrics: None,
        }
    }

    /// The standard stack described by `config`: an HTTP remote with
    /// caching, offline routing over `local`, retry, validation and logging.
    /// Metrics are left to the caller.
    pub fn from_config(
        config: &Config,
        local: Arc<dyn LocalStore>,
        connectivity: Arc<dyn Connectivity>,
    ) -> Result<Self> {
        let remote = HttpProductRepository::with_options(
            &config.catalog_url,
            Some(config.timeout()),
            config.api_token.as_deref(),
        )?;

        Ok(Self::new(Arc::new(remote))
            .cache(config.cache_capacity())
            .offline(local, connectivity, config.fallback_policy())
            .retry(config.retry_policy())
            .validate(true)
            .log(true))
    }

    /// Adds the read-through cache, optionally bounded.
    pub fn cache(mut self, capacity: Option<NonZeroUsize>) -> Self {
        self.cache = Some(capacity);
        self
    }

    /// Adds offline routing over `local`.
    pub fn offline(
        mut self,
        local: Arc<dyn LocalStore>,
        connectivity: Arc<dyn Connectivity>,
        fallback: FallbackPolicy,
    ) -> Self {
        self.offline = Some(OfflineLayer {
            local,
            connectivity,
            fallback,
        });
        self
    }

    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    pub fn validate(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    pub fn log(mut self, enabled: bool) -> Self {
        self.log = enabled;
        self
    }

    pub fn metrics(mut self, recorder: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = Some(recorder);
        self
    }

    /// Names of the configured layers, outermost first, ending with the leaf.
    pub fn layer_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.metrics.is_some() {
            names.push("Metrics");
        }
        if self.log {
            names.push("Logging");
        }
        if self.validate {
            names.push("Validating");
        }
        if self.retry.is_some() {
            names.push("Retry");
        }
        if self.offline.is_some() {
            names.push("Offline");
        }
        if self.cache.is_some() {
            names.push("Caching");
        }
        names.push("Remote");
        names
    }

    /// Human-readable nesting, e.g. `Logging(Retry(Remote))`.
    pub fn describe(&self) -> String {
        let names = self.layer_names();
        let depth = names.len() - 1;
        format!("{}{}", names.join("("), ")".repeat(depth))
    }

    /// Nests the configured layers and returns the outermost one.
    pub fn build(self) -> Arc<dyn ProductRepository> {
        tracing::debug!(layers = %self.describe(), "Building repository pipeline");

        let mut repo = self.remote;

        if let Some(capacity) = self.cache {
            let cached = match capacity {
                Some(capacity) => CachedProductRepository::with_capacity(repo, capacity),
                None => CachedProductRepository::new(repo),
            };
            repo = Arc::new(cached);
        }
        if let Some(layer) = self.offline {
            repo = Arc::new(
                OfflineProductRepository::new(repo, layer.local, layer.connectivity)
                    .with_fallback(layer.fallback),
            );
        }
        if let Some(policy) = self.retry {
            repo = Arc::new(RetryingProductRepository::new(repo, policy));
        }
        if self.validate {
            repo = Arc::new(ValidatingProductRepository::new(repo));
        }
        if self.log {
            repo = Arc::new(LoggingProductRepository::named(repo, "pipeline"));
        }
        if let Some(recorder) = self.metrics {
            repo = Arc::new(MetricsProductRepository::new(repo, recorder));
        }

        repo
    }
}
