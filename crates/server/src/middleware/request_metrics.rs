//! Request metrics middleware
//!
//! Counts status codes and times every request against a namespaced
//! [`MetricsClient`], optionally broken down by route. Metrics are emitted
//! once the inner service has produced its response; the response itself is
//! passed through untouched.

use axum::{
    extract::{MatchedPath, Request},
    http::{Method, Uri, response::Parts},
    response::Response,
};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};

use routestats_core::{MetricsClient, RouteContext, RouteTemplate, UrlTracking, record_completion};

/// Per-request route key overriding the derived route name.
///
/// Handlers attach it to their response (`Extension(MetricsKey::new(..))`);
/// upstream middleware may instead insert it into the request extensions.
/// The response-side key wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsKey(String);

impl MetricsKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Snapshot of the request taken before it is handed to the inner service.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub uri: Uri,
    pub route: Option<RouteTemplate>,
    pub metrics_key: Option<MetricsKey>,
}

impl RequestInfo {
    fn from_request(request: &Request) -> Self {
        let extensions = request.extensions();
        let route = extensions.get::<RouteTemplate>().cloned().or_else(|| {
            extensions
                .get::<MatchedPath>()
                .map(|matched| template_from_matched_path(matched.as_str()))
        });

        Self {
            method: request.method().clone(),
            uri: request.uri().clone(),
            route,
            metrics_key: extensions.get::<MetricsKey>().cloned(),
        }
    }
}

/// Rewrite axum capture syntax into a colon template.
///
/// `/users/{id}` becomes `/users/:id` and `/files/{*rest}` becomes
/// `/files/*rest`.
pub fn template_from_matched_path(path: &str) -> RouteTemplate {
    let template = path
        .split('/')
        .map(|segment| {
            match segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            {
                Some(wildcard) if wildcard.starts_with('*') => wildcard.to_string(),
                Some(param) => format!(":{}", param),
                None => segment.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("/");

    RouteTemplate::path(template)
}

/// Callback run after all metrics for a response were emitted.
pub type ResponseEndHook =
    Arc<dyn Fn(&dyn MetricsClient, Instant, &RequestInfo, &Parts) + Send + Sync>;

/// Middleware options. Everything is off by default.
#[derive(Clone, Default)]
pub struct MetricsOptions {
    pub tracking: UrlTracking,
    pub on_response_end: Option<ResponseEndHook>,
}

impl MetricsOptions {
    pub fn new(tracking: UrlTracking) -> Self {
        Self {
            tracking,
            on_response_end: None,
        }
    }

    pub fn on_response_end<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn MetricsClient, Instant, &RequestInfo, &Parts) + Send + Sync + 'static,
    {
        self.on_response_end = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for MetricsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricsOptions")
            .field("tracking", &self.tracking)
            .field("on_response_end", &self.on_response_end.is_some())
            .finish()
    }
}

/// Builds request metrics layers namespaced under a parent client.
#[derive(Clone)]
pub struct MiddlewareFactory {
    parent: Arc<dyn MetricsClient>,
}

impl MiddlewareFactory {
    pub fn new(parent: Arc<dyn MetricsClient>) -> Self {
        Self { parent }
    }

    /// Build a layer emitting under `prefix`; an empty prefix is the parent's
    /// own namespace.
    pub fn build(&self, prefix: &str, options: MetricsOptions) -> RequestMetricsLayer {
        RequestMetricsLayer::new(self.parent.child_client(prefix), options)
    }
}

/// Tower layer for request metrics
#[derive(Clone)]
pub struct RequestMetricsLayer {
    client: Arc<dyn MetricsClient>,
    options: Arc<MetricsOptions>,
}

impl RequestMetricsLayer {
    pub fn new(client: Arc<dyn MetricsClient>, options: MetricsOptions) -> Self {
        Self {
            client,
            options: Arc::new(options),
        }
    }
}

impl<S> Layer<S> for RequestMetricsLayer {
    type Service = RequestMetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestMetricsService {
            inner,
            client: Arc::clone(&self.client),
            options: Arc::clone(&self.options),
        }
    }
}

/// Tower service for request metrics
#[derive(Clone)]
pub struct RequestMetricsService<S> {
    inner: S,
    client: Arc<dyn MetricsClient>,
    options: Arc<MetricsOptions>,
}

impl<S> Service<Request> for RequestMetricsService<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let start = Instant::now();
        let info = RequestInfo::from_request(&request);
        let client = Arc::clone(&self.client);
        let options = Arc::clone(&self.options);

        let future = self.inner.call(request);

        Box::pin(async move {
            let response = future.await?;
            let (parts, body) = response.into_parts();

            let override_key = parts
                .extensions
                .get::<MetricsKey>()
                .filter(|key| !key.as_str().is_empty())
                .or(info.metrics_key.as_ref())
                .map(MetricsKey::as_str);

            let status = parts.status.as_u16();
            let route_name = record_completion(
                client.as_ref(),
                &options.tracking,
                start,
                status,
                &RouteContext {
                    method: info.method.as_str(),
                    template: info.route.as_ref(),
                    override_key,
                },
            );

            tracing::debug!(
                method = %info.method,
                status = status,
                route = route_name.as_deref().unwrap_or("-"),
                "Recorded request metrics"
            );

            if let Some(hook) = &options.on_response_end {
                hook(client.as_ref(), start, &info, &parts);
            }

            Ok(Response::from_parts(parts, body))
        })
    }
}
