//! Decision observer feeding the Prometheus registry.

use kusk_authz_core::{Decision, DecisionObserver, RequestMetadata};
use kusk_authz_telemetry::Metrics;

/// Counts decisions by outcome.
#[derive(Clone)]
pub struct MetricsObserver {
    metrics: Metrics,
}

impl MetricsObserver {
    /// Observe into the shared metrics registry.
    #[must_use]
    pub const fn new(metrics: Metrics) -> Self {
        Self { metrics }
    }
}

impl DecisionObserver for MetricsObserver {
    fn observe(&self, _request: &RequestMetadata, decision: &Decision) {
        self.metrics.inc_decision(decision.outcome());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn counts_each_outcome() -> anyhow::Result<()> {
        let metrics = Metrics::new()?;
        let observer = MetricsObserver::new(metrics.clone());
        let request = RequestMetadata::default();

        observer.observe(
            &request,
            &Decision::Allowed {
                identity: "kubeshop".to_string(),
            },
        );
        observer.observe(
            &request,
            &Decision::Denied {
                status: StatusCode::UNAUTHORIZED,
                body: "Unauthorized".to_string(),
            },
        );

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.allowed_total, 1);
        assert_eq!(snapshot.denied_total, 1);
        Ok(())
    }
}
