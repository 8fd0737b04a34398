//! HTTP surface modules (routers, handlers, middleware).

/// Admin endpoints (health, metrics).
pub mod admin;
/// Ext-authz handler and decision-to-response mapping.
pub mod authz;
/// Shared constants and header names for HTTP surfaces.
pub mod constants;
/// Problem response helpers.
pub mod errors;
/// Router construction and server hosts.
pub mod router;
/// Metrics middleware for HTTP requests.
pub mod telemetry;
