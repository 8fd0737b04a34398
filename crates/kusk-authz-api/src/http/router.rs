//! Router construction and server hosts for both listeners.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use kusk_authz_core::BasicAuthChecker;
use kusk_authz_telemetry::Metrics;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::info;

use crate::error::{ApiServerError, ApiServerResult};
use crate::http::admin::{health, metrics};
use crate::http::authz::authorize;
use crate::http::telemetry::{HttpMetricsLayer, trace_layer};
use crate::state::{AdminState, AuthzState};

const AUTHZ_LISTENER: &str = "authz";
const ADMIN_LISTENER: &str = "admin";

/// Hosts the ext-authz listener: any method, any path, one decision per request.
pub struct AuthzServer {
    router: Router,
}

impl AuthzServer {
    /// Wire the checker behind request-id, tracing, and metrics middleware.
    #[must_use]
    pub fn new(checker: BasicAuthChecker, telemetry: Metrics) -> Self {
        let state = Arc::new(AuthzState::new(checker));
        let router = Router::new()
            .fallback(authorize)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(kusk_authz_telemetry::set_request_id_layer())
                    .layer(kusk_authz_telemetry::propagate_request_id_layer())
                    .layer(trace_layer(AUTHZ_LISTENER))
                    .layer(HttpMetricsLayer::new(telemetry)),
            );
        Self { router }
    }

    /// Consume the server, returning the underlying router.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind `addr` and serve until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server terminates unexpectedly.
    pub async fn serve<F>(self, addr: SocketAddr, shutdown: F) -> ApiServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = bind(AUTHZ_LISTENER, addr).await?;
        serve_router(AUTHZ_LISTENER, self.router, listener, shutdown).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the server terminates unexpectedly.
    pub async fn serve_with_listener<F>(self, listener: TcpListener, shutdown: F) -> ApiServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        serve_router(AUTHZ_LISTENER, self.router, listener, shutdown).await
    }
}

/// Hosts the admin listener (`/health`, `/metrics`).
pub struct AdminServer {
    router: Router,
}

impl AdminServer {
    /// Build the admin routes over the shared metrics registry.
    #[must_use]
    pub fn new(telemetry: Metrics) -> Self {
        let state = Arc::new(AdminState::new(telemetry));
        let router = Router::new()
            .route("/health", get(health))
            .route("/metrics", get(metrics))
            .with_state(state)
            .layer(trace_layer(ADMIN_LISTENER));
        Self { router }
    }

    /// Consume the server, returning the underlying router.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind `addr` and serve until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server terminates unexpectedly.
    pub async fn serve<F>(self, addr: SocketAddr, shutdown: F) -> ApiServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = bind(ADMIN_LISTENER, addr).await?;
        serve_router(ADMIN_LISTENER, self.router, listener, shutdown).await
    }
}

async fn bind(listener: &'static str, addr: SocketAddr) -> ApiServerResult<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ApiServerError::Bind {
            listener,
            addr,
            source,
        })
}

async fn serve_router<F>(
    listener_name: &'static str,
    router: Router,
    listener: TcpListener,
    shutdown: F,
) -> ApiServerResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(listener = listener_name, addr = %addr, "listener ready");
    }
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|source| ApiServerError::Serve {
            listener: listener_name,
            source,
        })?;
    info!(listener = listener_name, "listener stopped");
    Ok(())
}
