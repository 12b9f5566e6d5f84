//! In-memory metrics client
//!
//! Records every emission in order. Children share the parent's sink, so a
//! single handle observes everything emitted under any namespace.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::client::{MetricsClient, qualify};

/// A single recorded metric call, with its fully qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    Increment(String),
    Timing(String),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingClient {
    namespace: String,
    sink: Arc<Mutex<Vec<Emission>>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn emissions(&self) -> Vec<Emission> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Emission>> {
        self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MetricsClient for RecordingClient {
    fn increment(&self, name: &str) {
        self.lock()
            .push(Emission::Increment(qualify(&self.namespace, name)));
    }

    fn timing(&self, name: &str, _start: Instant) {
        self.lock().push(Emission::Timing(qualify(&self.namespace, name)));
    }

    fn child_client(&self, prefix: &str) -> Arc<dyn MetricsClient> {
        Arc::new(RecordingClient {
            namespace: qualify(&self.namespace, prefix),
            sink: Arc::clone(&self.sink),
        })
    }
}
