//! Checker wiring shared by every entry point.

use std::sync::Arc;

use kusk_authz_core::{BasicAuthChecker, CredentialProvider, TracingObserver};
use kusk_authz_telemetry::Metrics;

use crate::observer::MetricsObserver;

/// Build a checker with the standard observers (structured log line and decision counters).
#[must_use]
pub fn build_checker(
    provider: Arc<dyn CredentialProvider>,
    reveal_hint: bool,
    metrics: &Metrics,
) -> BasicAuthChecker {
    BasicAuthChecker::new(provider, reveal_hint)
        .with_observer(Arc::new(TracingObserver))
        .with_observer(Arc::new(MetricsObserver::new(metrics.clone())))
}
