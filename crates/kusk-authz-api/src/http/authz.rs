//! Ext-authz handler.
//!
//! Every request on the ext-authz listener lands here regardless of method or
//! path. The request body is never read.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
};
use kusk_authz_core::{Decision, IDENTITY_HEADER};
use tracing::error;

use crate::http::errors::ApiError;
use crate::state::AuthzState;

/// HTTP rendering of a [`Decision`].
///
/// - `Allowed`: `200`, empty body, `x-current-user: <identity>`.
/// - `Denied`: the decision's status with its plain-text body.
#[derive(Debug)]
pub struct DecisionResponse(pub Decision);

impl IntoResponse for DecisionResponse {
    fn into_response(self) -> Response {
        match self.0 {
            Decision::Allowed { identity } => match HeaderValue::from_str(&identity) {
                Ok(value) => {
                    let mut response = StatusCode::OK.into_response();
                    response
                        .headers_mut()
                        .insert(HeaderName::from_static(IDENTITY_HEADER), value);
                    response
                }
                Err(err) => {
                    error!(error = %err, "identity is not representable as a header value");
                    ApiError::internal("identity is not representable as a header value")
                        .into_response()
                }
            },
            Decision::Denied { status, body } => (status, body).into_response(),
        }
    }
}

pub(crate) async fn authorize(
    State(state): State<Arc<AuthzState>>,
    request: Request<Body>,
) -> DecisionResponse {
    DecisionResponse(state.checker.check(&request))
}
