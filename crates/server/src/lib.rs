//! routestats-server: request metrics middleware for axum
//!
//! Exposes the middleware factory, the `metrics` facade client, and
//! `build_app` for the demo binary and integration tests.

pub mod config;
pub mod error;
pub mod middleware;
pub mod recorder;
mod routes;

use axum::{Extension, Router, routing::get};
use routestats_core::MetricsClient;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use config::Config;
use middleware::{MetricsOptions, MiddlewareFactory};

pub use middleware::{MetricsKey, RequestInfo, RequestMetricsLayer, ResponseEndHook};
pub use recorder::RecorderClient;

/// Build the demo application router with request metrics attached.
///
/// Metrics go to `client`, namespaced under `config.metrics_prefix`.
/// Extracted from `main()` so integration tests can pass a recording client
/// and drive the router without binding to a TCP port.
pub fn build_app(config: &Config, client: Arc<dyn MetricsClient>) -> Router {
    let request_metrics = MiddlewareFactory::new(client)
        .build(&config.metrics_prefix, MetricsOptions::new(config.tracking));

    // Use build_recorder() + set_global_recorder() so that repeated calls
    // (e.g. in integration tests) don't panic; the second install is
    // ignored and we still get a handle for /metrics.
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    let prometheus_handle = recorder.handle();
    let _ = metrics::set_global_recorder(recorder);

    Router::new()
        .route("/", get(routes::api::index))
        .route("/health", get(routes::health::check))
        .route("/metrics", get(routes::metrics::get))
        .route("/api/{user}/{thing}", get(routes::api::thing))
        .route("/reports/{id}", get(routes::api::report))
        .layer(Extension(prometheus_handle))
        .layer(request_metrics)
        .layer(TraceLayer::new_for_http())
}
