//! Authorization outcome returned to the calling proxy.

use http::StatusCode;

/// Response header carrying the authenticated principal back to the proxy.
pub const IDENTITY_HEADER: &str = "x-current-user";

/// Result of evaluating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Credentials matched; the proxy should forward the request.
    Allowed {
        /// Validated username, surfaced as [`IDENTITY_HEADER`].
        identity: String,
    },
    /// Credentials were missing, malformed, or wrong.
    Denied {
        /// Status returned to the proxy (always `401`).
        status: StatusCode,
        /// Human-readable response body.
        body: String,
    },
}

impl Decision {
    /// Whether the request was authorized.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Allowed { .. } => "allowed",
            Self::Denied { .. } => "denied",
        }
    }

    /// HTTP status the proxy should observe.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Allowed { .. } => StatusCode::OK,
            Self::Denied { status, .. } => *status,
        }
    }
}
