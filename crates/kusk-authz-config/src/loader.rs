//! Environment loading.
//!
//! Values are read through a lookup function so callers and tests can supply
//! their own source instead of the process environment. Empty values are
//! treated as unset.

use std::fs;
use std::path::PathBuf;

use kusk_authz_core::{DEFAULT_PASSWORD, DEFAULT_USERNAME, StaticCredentials};

use crate::error::{ConfigError, ConfigResult};
use crate::model::{AuthzConfig, DEFAULT_BIND_ADDR, DEFAULT_LOG_LEVEL, DEFAULT_PORT};
use crate::validate::{parse_flag, parse_ip, parse_port, validate_username};

/// Ext-authz listener port.
pub const ENV_PORT: &str = "PORT";
/// Listener IP address.
pub const ENV_BIND_ADDR: &str = "AUTHZ_BIND_ADDR";
/// Admin listener port.
pub const ENV_ADMIN_PORT: &str = "AUTHZ_ADMIN_PORT";
/// Accepted username.
pub const ENV_USERNAME: &str = "AUTHZ_USERNAME";
/// Accepted password.
pub const ENV_PASSWORD: &str = "AUTHZ_PASSWORD";
/// File holding the accepted password; takes precedence over `AUTHZ_PASSWORD`.
pub const ENV_PASSWORD_FILE: &str = "AUTHZ_PASSWORD_FILE";
/// Toggle for the credential hint in deny bodies.
pub const ENV_REVEAL_HINT: &str = "AUTHZ_REVEAL_HINT";
/// Fallback log filter.
pub const ENV_LOG_LEVEL: &str = "AUTHZ_LOG_LEVEL";
/// Log output format.
pub const ENV_LOG_FORMAT: &str = "AUTHZ_LOG_FORMAT";

impl AuthzConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a value is invalid or a secret file cannot be read.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a value is invalid or a secret file cannot be read.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let trimmed = |name: &str| raw(name).map(|value| value.trim().to_string());

        let port = trimmed(ENV_PORT)
            .map(|value| parse_port(ENV_PORT, &value))
            .transpose()?
            .unwrap_or(DEFAULT_PORT);
        let bind_addr = trimmed(ENV_BIND_ADDR)
            .map(|value| parse_ip(ENV_BIND_ADDR, &value))
            .transpose()?
            .unwrap_or(DEFAULT_BIND_ADDR);
        let admin_port = trimmed(ENV_ADMIN_PORT)
            .map(|value| parse_port(ENV_ADMIN_PORT, &value))
            .transpose()?;
        if admin_port == Some(port) {
            return Err(ConfigError::invalid(
                ENV_ADMIN_PORT,
                Some(&port.to_string()),
                "conflicts_with_port",
            ));
        }

        let username = raw(ENV_USERNAME).unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        validate_username(ENV_USERNAME, &username)?;
        let password = match trimmed(ENV_PASSWORD_FILE) {
            Some(path) => read_secret_file(ENV_PASSWORD_FILE, PathBuf::from(path))?,
            None => raw(ENV_PASSWORD).unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        };

        let reveal_hint = trimmed(ENV_REVEAL_HINT)
            .map(|value| parse_flag(ENV_REVEAL_HINT, &value))
            .transpose()?
            .unwrap_or(true);

        Ok(Self {
            bind_addr,
            port,
            admin_port,
            credentials: StaticCredentials::new(username, password),
            reveal_hint,
            log_level: trimmed(ENV_LOG_LEVEL).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format: trimmed(ENV_LOG_FORMAT).map(|value| value.to_ascii_lowercase()),
        })
    }
}

fn read_secret_file(field: &'static str, path: PathBuf) -> ConfigResult<String> {
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(source) => return Err(ConfigError::SecretFile { field, path, source }),
    };
    let secret = contents.trim_end_matches(['\r', '\n']);
    if secret.is_empty() {
        return Err(ConfigError::invalid(
            field,
            path.to_str(),
            "empty_secret",
        ));
    }
    Ok(secret.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::error::Error;
    use std::net::SocketAddr;
    use std::io::Write as _;

    use kusk_authz_core::{CredentialProvider, Credentials};

    fn load(pairs: &[(&str, &str)]) -> ConfigResult<AuthzConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        AuthzConfig::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() -> Result<(), Box<dyn Error>> {
        let config = load(&[])?;
        assert_eq!(config, AuthzConfig::default());
        Ok(())
    }

    #[test]
    fn empty_port_falls_back_to_default() -> Result<(), Box<dyn Error>> {
        let config = load(&[(ENV_PORT, "")])?;
        assert_eq!(config.port, DEFAULT_PORT);
        let config = load(&[(ENV_PORT, "  ")])?;
        assert_eq!(config.port, DEFAULT_PORT);
        Ok(())
    }

    #[test]
    fn port_override_is_applied() -> Result<(), Box<dyn Error>> {
        let config = load(&[(ENV_PORT, "8080"), (ENV_BIND_ADDR, "127.0.0.1")])?;
        assert_eq!(config.listen_addr(), "127.0.0.1:8080".parse::<SocketAddr>()?);
        Ok(())
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(matches!(
            load(&[(ENV_PORT, "http")]),
            Err(ConfigError::InvalidField {
                field: ENV_PORT,
                reason: "not_a_port",
                ..
            })
        ));
    }

    #[test]
    fn admin_port_must_differ_from_port() {
        assert!(matches!(
            load(&[(ENV_PORT, "9002"), (ENV_ADMIN_PORT, "9002")]),
            Err(ConfigError::InvalidField {
                field: ENV_ADMIN_PORT,
                reason: "conflicts_with_port",
                ..
            })
        ));
        assert_eq!(
            load(&[(ENV_ADMIN_PORT, "9003")]).ok().and_then(|c| c.admin_port),
            Some(9003)
        );
    }

    #[test]
    fn credentials_are_injected() -> Result<(), Box<dyn Error>> {
        let config = load(&[(ENV_USERNAME, "kusk"), (ENV_PASSWORD, "kusk")])?;
        assert!(config.credentials.verify(&Credentials::new("kusk", "kusk")));
        assert!(
            !config
                .credentials
                .verify(&Credentials::new("kubeshop", "kubeshop"))
        );
        Ok(())
    }

    #[test]
    fn password_is_not_trimmed() -> Result<(), Box<dyn Error>> {
        let config = load(&[(ENV_PASSWORD, " spaced ")])?;
        assert!(
            config
                .credentials
                .verify(&Credentials::new("kubeshop", " spaced "))
        );
        Ok(())
    }

    #[test]
    fn username_with_colon_is_rejected() {
        assert!(matches!(
            load(&[(ENV_USERNAME, "kube:shop")]),
            Err(ConfigError::InvalidField {
                field: ENV_USERNAME,
                ..
            })
        ));
    }

    #[test]
    fn password_file_takes_precedence() -> Result<(), Box<dyn Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "from-file")?;
        let path = file.path().to_string_lossy().into_owned();

        let config = load(&[(ENV_PASSWORD, "from-env"), (ENV_PASSWORD_FILE, path.as_str())])?;
        assert!(
            config
                .credentials
                .verify(&Credentials::new("kubeshop", "from-file"))
        );
        Ok(())
    }

    #[test]
    fn missing_password_file_is_reported() {
        assert!(matches!(
            load(&[(ENV_PASSWORD_FILE, "/nonexistent/kusk-authz/password")]),
            Err(ConfigError::SecretFile {
                field: ENV_PASSWORD_FILE,
                ..
            })
        ));
    }

    #[test]
    fn empty_password_file_is_rejected() -> Result<(), Box<dyn Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file)?;
        let path = file.path().to_string_lossy().into_owned();
        assert!(matches!(
            load(&[(ENV_PASSWORD_FILE, path.as_str())]),
            Err(ConfigError::InvalidField {
                reason: "empty_secret",
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn hint_and_logging_settings() -> Result<(), Box<dyn Error>> {
        let config = load(&[
            (ENV_REVEAL_HINT, "false"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_FORMAT, "JSON"),
        ])?;
        assert!(!config.reveal_hint);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format.as_deref(), Some("json"));
        assert!(load(&[(ENV_REVEAL_HINT, "sometimes")]).is_err());
        Ok(())
    }
}
