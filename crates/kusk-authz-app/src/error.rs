//! # Design
//!
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: kusk_authz_config::ConfigError,
    },
    /// A listener failed to bind or terminated unexpectedly.
    #[error("api server operation failed")]
    ApiServer {
        /// Operation identifier.
        operation: &'static str,
        /// Source API server error.
        source: kusk_authz_api::ApiServerError,
    },
    /// Telemetry could not be initialised.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: kusk_authz_telemetry::TelemetryError,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: kusk_authz_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn api_server(
        operation: &'static str,
        source: kusk_authz_api::ApiServerError,
    ) -> Self {
        Self::ApiServer { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: kusk_authz_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn app_error_helpers_build_variants() -> Result<(), Box<dyn Error>> {
        let Err(utf8_error) = String::from_utf8(vec![0xff]) else {
            return Err(io::Error::other("expected invalid utf-8").into());
        };

        let config = AppError::config(
            "config.load",
            kusk_authz_config::ConfigError::InvalidField {
                field: "PORT",
                value: Some("abc".to_string()),
                reason: "not_a_port",
            },
        );
        assert!(matches!(config, AppError::Config { .. }));
        assert_eq!(config.to_string(), "configuration operation failed");
        assert!(config.source().is_some());

        let api = AppError::api_server(
            "api_server.serve",
            kusk_authz_api::ApiServerError::Serve {
                listener: "authz",
                source: io::Error::other("io"),
            },
        );
        assert!(matches!(api, AppError::ApiServer { .. }));

        let telemetry = AppError::telemetry(
            "telemetry.metrics",
            kusk_authz_telemetry::TelemetryError::MetricsUtf8 { source: utf8_error },
        );
        assert!(matches!(telemetry, AppError::Telemetry { .. }));
        Ok(())
    }
}
