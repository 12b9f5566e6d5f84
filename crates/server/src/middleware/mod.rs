//! HTTP middleware

pub mod request_metrics;

pub use request_metrics::{
    MetricsKey, MetricsOptions, MiddlewareFactory, RequestInfo, RequestMetricsLayer,
    RequestMetricsService, ResponseEndHook,
};
