//! # Design
//!
//! - Name every way a Basic `Authorization` header can be unusable.
//! - Keep messages constant; none of them carry presented credential material.
//! - The checker collapses all variants into a single deny outcome.

use thiserror::Error;

/// Result alias for credential extraction.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Reasons a request did not yield usable Basic credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No `Authorization` header was present.
    #[error("authorization header missing")]
    MissingHeader,
    /// The header value contained non-visible-ASCII bytes.
    #[error("authorization header is not valid ASCII")]
    HeaderNotAscii,
    /// The header used a scheme other than `Basic`.
    #[error("unsupported authorization scheme")]
    UnsupportedScheme,
    /// The credential payload was not valid base64.
    #[error("malformed base64 credentials")]
    MalformedEncoding {
        /// Underlying decode error.
        source: base64::DecodeError,
    },
    /// The decoded payload was not valid UTF-8.
    #[error("credentials are not valid UTF-8")]
    NotUtf8,
    /// The decoded payload had no `:` between username and password.
    #[error("credentials missing separator")]
    MissingSeparator,
}
