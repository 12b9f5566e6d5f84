//! `metrics` facade client
//!
//! Forwards increments and timings to whatever global recorder is installed
//! (Prometheus in the server binary). Timings are recorded in milliseconds.

use routestats_core::{MetricsClient, qualify};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct RecorderClient {
    namespace: String,
}

impl RecorderClient {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            namespace: prefix.into(),
        }
    }
}

impl MetricsClient for RecorderClient {
    fn increment(&self, name: &str) {
        metrics::counter!(qualify(&self.namespace, name)).increment(1);
    }

    fn timing(&self, name: &str, start: Instant) {
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        metrics::histogram!(qualify(&self.namespace, name)).record(elapsed_ms);
    }

    fn child_client(&self, prefix: &str) -> Arc<dyn MetricsClient> {
        Arc::new(Self {
            namespace: qualify(&self.namespace, prefix),
        })
    }
}
