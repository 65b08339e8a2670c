//! Metrics recording for the repository pipeline.
//!
//! The metrics decorator reports into a [`MetricsRecorder`] handed to it at
//! construction. [`InMemoryMetrics`] keeps everything in process and can be
//! dumped as a serializable [`MetricsSnapshot`].

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;

use catalog_core::storage::Operation;

/// Outcome label for a successful call.
pub const OUTCOME_OK: &str = "ok";

/// Sink for per-operation measurements.
pub trait MetricsRecorder: Send + Sync {
    /// Counts one call and its latency. `outcome` is [`OUTCOME_OK`] or an
    /// error kind label.
    fn record_call(&self, operation: Operation, outcome: &'static str, elapsed: Duration);

    /// Sets the result-size gauge for `operation`.
    fn record_result_size(&self, operation: Operation, size: usize);
}

#[derive(Debug, Default, Clone, Copy)]
struct CallStats {
    count: u64,
    total: Duration,
    max: Duration,
}

#[derive(Debug, Default)]
struct MetricsState {
    calls: BTreeMap<(Operation, &'static str), CallStats>,
    result_sizes: BTreeMap<Operation, usize>,
}

/// In-process metrics recorder.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    state: Mutex<MetricsState>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MetricsState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Number of calls to `operation` that ended with `outcome`.
    pub fn call_count(&self, operation: Operation, outcome: &str) -> u64 {
        self.with_state(|state| {
            state
                .calls
                .iter()
                .filter(|((op, out), _)| *op == operation && *out == outcome)
                .map(|(_, stats)| stats.count)
                .sum()
        })
    }

    /// Number of calls to `operation` regardless of outcome.
    pub fn total_calls(&self, operation: Operation) -> u64 {
        self.with_state(|state| {
            state
                .calls
                .iter()
                .filter(|((op, _), _)| *op == operation)
                .map(|(_, stats)| stats.count)
                .sum()
        })
    }

    /// Cumulative latency of every call to `operation`.
    pub fn total_latency(&self, operation: Operation) -> Duration {
        self.with_state(|state| {
            state
                .calls
                .iter()
                .filter(|((op, _), _)| *op == operation)
                .map(|(_, stats)| stats.total)
                .sum()
        })
    }

    /// Last result size recorded for `operation`.
    pub fn last_result_size(&self, operation: Operation) -> Option<usize> {
        self.with_state(|state| state.result_sizes.get(&operation).copied())
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.with_state(|state| MetricsSnapshot {
            calls: state
                .calls
                .iter()
                .map(|((operation, outcome), stats)| CallMetric {
                    operation: operation.as_str(),
                    outcome: *outcome,
                    count: stats.count,
                    total_ms: millis(stats.total),
                    max_ms: millis(stats.max),
                })
                .collect(),
            result_sizes: state
                .result_sizes
                .iter()
                .map(|(operation, size)| (operation.as_str(), *size))
                .collect(),
        })
    }
}

impl MetricsRecorder for InMemoryMetrics {
    fn record_call(&self, operation: Operation, outcome: &'static str, elapsed: Duration) {
        self.with_state(|state| {
            let stats = state.calls.entry((operation, outcome)).or_default();
            stats.count += 1;
            stats.total += elapsed;
            stats.max = stats.max.max(elapsed);
        });
    }

    fn record_result_size(&self, operation: Operation, size: usize) {
        self.with_state(|state| {
            state.result_sizes.insert(operation, size);
        });
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_micros() as f64 / 1000.0
}

/// One (operation, outcome) row of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallMetric {
    pub operation: &'static str,
    pub outcome: &'static str,
    pub count: u64,
    pub total_ms: f64,
    pub max_ms: f64,
}

/// Point-in-time copy of an [`InMemoryMetrics`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub calls: Vec<CallMetric>,
    pub result_sizes: BTreeMap<&'static str, usize>,
}
