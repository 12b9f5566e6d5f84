//! Metrics client abstraction

use std::sync::Arc;
use std::time::Instant;

/// A namespaced metrics sink.
///
/// Implementations must be safe to share between in-flight requests; the
/// middleware only ever holds an `Arc` to one.
pub trait MetricsClient: Send + Sync {
    /// Add one to the counter `name`.
    fn increment(&self, name: &str);

    /// Record the time elapsed since `start` under `name`.
    fn timing(&self, name: &str, start: Instant);

    /// Return a client whose metric names are nested under `prefix`.
    fn child_client(&self, prefix: &str) -> Arc<dyn MetricsClient>;
}

/// Join a namespace and a metric name with a dot.
///
/// An empty namespace leaves the name untouched.
pub fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else if name.is_empty() {
        namespace.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}
