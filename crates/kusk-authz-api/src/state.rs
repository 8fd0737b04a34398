//! Shared listener state.

use std::time::Instant;

use kusk_authz_core::BasicAuthChecker;
use kusk_authz_telemetry::Metrics;

/// State behind the ext-authz listener.
#[derive(Debug)]
pub struct AuthzState {
    pub(crate) checker: BasicAuthChecker,
}

impl AuthzState {
    /// Wrap a configured checker.
    #[must_use]
    pub const fn new(checker: BasicAuthChecker) -> Self {
        Self { checker }
    }
}

/// State behind the admin listener.
pub struct AdminState {
    pub(crate) metrics: Metrics,
    pub(crate) started_at: Instant,
}

impl AdminState {
    /// Capture the metrics registry and the process start instant.
    #[must_use]
    pub fn new(metrics: Metrics) -> Self {
        Self {
            metrics,
            started_at: Instant::now(),
        }
    }
}
