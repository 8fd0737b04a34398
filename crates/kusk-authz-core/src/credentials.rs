//! Extraction of HTTP Basic credentials from request headers.

use std::fmt;

use base64::{Engine as _, engine::general_purpose};
use http::{HeaderMap, header::AUTHORIZATION};

use crate::error::{CredentialError, CredentialResult};

const BASIC_SCHEME: &str = "Basic";

/// Username and password presented by a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Build a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Presented username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Presented password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Consume the pair, keeping only the username.
    #[must_use]
    pub fn into_username(self) -> String {
        self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Read Basic credentials from the `Authorization` header.
///
/// Header names are matched case-insensitively. When the header is repeated,
/// the last value wins.
///
/// # Errors
///
/// Returns a [`CredentialError`] describing why no credentials could be read.
pub fn extract_basic(headers: &HeaderMap) -> CredentialResult<Credentials> {
    let value = headers
        .get_all(AUTHORIZATION)
        .iter()
        .next_back()
        .ok_or(CredentialError::MissingHeader)?;
    let value = value
        .to_str()
        .map_err(|_| CredentialError::HeaderNotAscii)?;
    parse_basic(value)
}

/// Parse an `Authorization` header value of the form `Basic <base64(user:pass)>`.
///
/// The scheme token is case-insensitive and the payload is split on the first
/// `:`, so passwords may themselves contain colons.
///
/// # Errors
///
/// Returns a [`CredentialError`] for a non-Basic scheme, malformed base64,
/// non-UTF-8 payloads, or a payload without a separator.
pub fn parse_basic(value: &str) -> CredentialResult<Credentials> {
    let trimmed = value.trim();
    let (scheme, encoded) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    if !scheme.eq_ignore_ascii_case(BASIC_SCHEME) {
        return Err(CredentialError::UnsupportedScheme);
    }

    let decoded = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|source| CredentialError::MalformedEncoding { source })?;
    let decoded = String::from_utf8(decoded).map_err(|_| CredentialError::NotUtf8)?;
    let (username, password) = decoded
        .split_once(':')
        .ok_or(CredentialError::MissingSeparator)?;

    Ok(Credentials::new(username, password))
}
