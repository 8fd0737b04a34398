//! Decision observers.
//!
//! Observers see the decision plus request metadata that is safe to log:
//! method, path, and request id. Header values and credentials never reach them.

use http::Request;
use tracing::info;

use crate::decision::Decision;

/// Header carrying the per-request correlation id.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

/// Non-sensitive request attributes handed to observers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    /// HTTP method of the checked request.
    pub method: String,
    /// Request path, without query string.
    pub path: String,
    /// Correlation id, when the proxy or a layer supplied one.
    pub request_id: Option<String>,
}

impl RequestMetadata {
    /// Capture metadata from an inbound request.
    #[must_use]
    pub fn from_request<B>(request: &Request<B>) -> Self {
        let request_id = request
            .headers()
            .get(HEADER_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        Self {
            method: request.method().as_str().to_string(),
            path: request.uri().path().to_string(),
            request_id,
        }
    }
}

/// Receives every decision the checker produces.
pub trait DecisionObserver: Send + Sync {
    /// Called once per checked request, after the decision is final.
    fn observe(&self, request: &RequestMetadata, decision: &Decision);
}

/// Emits one structured `tracing` event per decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DecisionObserver for TracingObserver {
    fn observe(&self, request: &RequestMetadata, decision: &Decision) {
        let request_id = request.request_id.as_deref().unwrap_or_default();
        match decision {
            Decision::Allowed { identity } => info!(
                outcome = decision.outcome(),
                method = %request.method,
                path = %request.path,
                request_id = %request_id,
                identity = %identity,
                "request authorized"
            ),
            Decision::Denied { status, .. } => info!(
                outcome = decision.outcome(),
                method = %request.method,
                path = %request.path,
                request_id = %request_id,
                status = status.as_u16(),
                "request denied"
            ),
        }
    }
}
