//! routestats-core: framework-independent request metrics
//!
//! This crate provides the metrics client abstraction, route-name derivation
//! and the per-request emission policy shared by the HTTP middleware.

pub mod client;
pub mod error;
pub mod policy;
pub mod recording;
pub mod route;

pub use client::{MetricsClient, qualify};
pub use error::RouteError;
pub use policy::{RouteContext, UrlTracking, record_completion};
pub use recording::{Emission, RecordingClient};
pub use route::{RouteTemplate, UNKNOWN_ROUTE, derive_route_name, sanitize_route_name};
