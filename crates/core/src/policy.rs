//! Per-request metric emission policy

use serde::Deserialize;
use std::time::Instant;

use crate::client::MetricsClient;
use crate::route::{RouteTemplate, derive_route_name, sanitize_route_name};

/// Which per-route metrics to emit.
///
/// With every flag off a single global `response_time` timing is emitted
/// instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UrlTracking {
    /// Per-route timing, replacing the global one.
    pub time_by_url: bool,
    pub count_by_url: bool,
    pub status_code_by_url: bool,
}

impl UrlTracking {
    pub fn any(&self) -> bool {
        self.time_by_url || self.count_by_url || self.status_code_by_url
    }
}

/// What is known about a request's route when its response completes.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    pub method: &'a str,
    pub template: Option<&'a RouteTemplate>,
    pub override_key: Option<&'a str>,
}

/// Emit the completion metrics for one response.
///
/// Returns the sanitized route name when per-route tracking derived one.
pub fn record_completion(
    client: &dyn MetricsClient,
    tracking: &UrlTracking,
    start: Instant,
    status: u16,
    route: &RouteContext<'_>,
) -> Option<String> {
    client.increment(&format!("response_code.{}", status));

    if !tracking.any() {
        client.timing("response_time", start);
        return None;
    }

    let route_name = sanitize_route_name(&derive_route_name(
        route.method,
        route.template,
        route.override_key,
    ));

    if tracking.time_by_url {
        client.timing(&format!("response_time.{}", route_name), start);
    }
    if tracking.count_by_url {
        client.increment(&route_name);
    }
    if tracking.status_code_by_url {
        client.increment(&format!("response_code.{}.{}", route_name, status));
    }

    Some(route_name)
}
