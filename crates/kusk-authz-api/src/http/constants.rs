//! Shared HTTP constants (headers, problem URIs).

pub(crate) use kusk_authz_core::HEADER_REQUEST_ID;

pub(crate) const PROBLEM_INTERNAL: &str = "https://kusk.io/problems/internal";
pub(crate) const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";
