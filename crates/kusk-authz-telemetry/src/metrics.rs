//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Only outcome and status labels are recorded; identities never become label values.

use std::sync::Arc;

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use serde::Serialize;

use crate::error::{Result, TelemetryError};

const OUTCOME_ALLOWED: &str = "allowed";
const OUTCOME_DENIED: &str = "denied";

/// Prometheus-backed metrics registry shared across listeners.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    authz_decisions_total: IntCounterVec,
}

/// Snapshot of decision counters for health reporting.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Requests authorized since start.
    pub allowed_total: u64,
    /// Requests denied since start.
    pub denied_total: u64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be
    /// built or registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests received"),
            &["code"],
        )
        .map_err(|source| TelemetryError::MetricsCollector {
            name: "http_requests_total",
            source,
        })?;
        let authz_decisions_total = IntCounterVec::new(
            Opts::new(
                "authz_decisions_total",
                "Authorization decisions by outcome",
            ),
            &["outcome"],
        )
        .map_err(|source| TelemetryError::MetricsCollector {
            name: "authz_decisions_total",
            source,
        })?;

        registry
            .register(Box::new(http_requests_total.clone()))
            .map_err(|source| TelemetryError::MetricsRegister {
                name: "http_requests_total",
                source,
            })?;
        registry
            .register(Box::new(authz_decisions_total.clone()))
            .map_err(|source| TelemetryError::MetricsRegister {
                name: "authz_decisions_total",
                source,
            })?;

        // Pre-create both outcome series so they render as zero before the first request.
        let _ = authz_decisions_total.with_label_values(&[OUTCOME_ALLOWED]);
        let _ = authz_decisions_total.with_label_values(&[OUTCOME_DENIED]);

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                http_requests_total,
                authz_decisions_total,
            }),
        })
    }

    /// Increment the HTTP request counter for the given status code.
    pub fn inc_http_request(&self, status: u16) {
        self.inner
            .http_requests_total
            .with_label_values(&[&status.to_string()])
            .inc();
    }

    /// Increment the decision counter for `allowed` or `denied`.
    pub fn inc_decision(&self, outcome: &str) {
        self.inner
            .authz_decisions_total
            .with_label_values(&[outcome])
            .inc();
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|source| TelemetryError::MetricsEncode { source })?;
        String::from_utf8(buffer).map_err(|source| TelemetryError::MetricsUtf8 { source })
    }

    /// Take a point-in-time snapshot of the decision counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let counter = |outcome: &str| {
            self.inner
                .authz_decisions_total
                .with_label_values(&[outcome])
                .get()
        };
        MetricsSnapshot {
            allowed_total: counter(OUTCOME_ALLOWED),
            denied_total: counter(OUTCOME_DENIED),
        }
    }
}
