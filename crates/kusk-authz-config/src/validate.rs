//! Parsing helpers for raw environment values.

use std::net::IpAddr;

use crate::error::{ConfigError, ConfigResult};

/// Parse a TCP port in `1..=65535`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] when the value is not a number or is zero.
pub fn parse_port(field: &'static str, raw: &str) -> ConfigResult<u16> {
    let port = raw
        .parse::<u16>()
        .map_err(|_| ConfigError::invalid(field, Some(raw), "not_a_port"))?;
    if port == 0 {
        return Err(ConfigError::invalid(field, Some(raw), "zero"));
    }
    Ok(port)
}

/// Parse an IPv4 or IPv6 listener address.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] when the value is not an IP address.
pub fn parse_ip(field: &'static str, raw: &str) -> ConfigResult<IpAddr> {
    raw.parse::<IpAddr>()
        .map_err(|_| ConfigError::invalid(field, Some(raw), "not_an_ip_address"))
}

/// Parse a boolean toggle (`1/0`, `true/false`, `yes/no`, `on/off`).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for any other value.
pub fn parse_flag(field: &'static str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(field, Some(raw), "not_a_flag")),
    }
}

/// Reject usernames that cannot be expressed in a Basic `user:pass` payload.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] when the username contains `:` or a
/// control character (it is echoed back as the `x-current-user` header).
pub fn validate_username(field: &'static str, username: &str) -> ConfigResult<()> {
    if username.contains(':') {
        return Err(ConfigError::invalid(
            field,
            Some(username),
            "contains_separator",
        ));
    }
    if username.chars().any(char::is_control) {
        return Err(ConfigError::invalid(
            field,
            Some(username),
            "contains_control_character",
        ));
    }
    Ok(())
}
