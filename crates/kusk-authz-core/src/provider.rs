//! Credential verification capability injected into the checker.

use std::fmt;

use subtle::ConstantTimeEq;

use crate::credentials::Credentials;

/// Username accepted when no override is configured.
pub const DEFAULT_USERNAME: &str = "kubeshop";
/// Password accepted when no override is configured.
pub const DEFAULT_PASSWORD: &str = "kubeshop";

/// Source of truth for which presented credentials are valid.
pub trait CredentialProvider: Send + Sync {
    /// Return `true` when both username and password match exactly.
    fn verify(&self, presented: &Credentials) -> bool;

    /// Credential hint revealed in deny responses, if the provider has one.
    fn hint(&self) -> Option<String>;
}

/// A single credential pair supplied by configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    /// Build a provider accepting exactly one username/password pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Configured username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl CredentialProvider for StaticCredentials {
    fn verify(&self, presented: &Credentials) -> bool {
        // Both halves are compared unconditionally.
        let username = presented
            .username()
            .as_bytes()
            .ct_eq(self.username.as_bytes());
        let password = presented
            .password()
            .as_bytes()
            .ct_eq(self.password.as_bytes());
        (username & password).into()
    }

    fn hint(&self) -> Option<String> {
        Some(format!("{}:{}", self.username, self.password))
    }
}
