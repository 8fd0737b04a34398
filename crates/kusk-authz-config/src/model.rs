//! Typed configuration for the checker process.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use kusk_authz_core::StaticCredentials;

/// Ext-authz listener port when `PORT` is unset or empty.
pub const DEFAULT_PORT: u16 = 9002;
/// Listener address when `AUTHZ_BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
/// Log filter used when neither `RUST_LOG` nor `AUTHZ_LOG_LEVEL` is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Fully resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthzConfig {
    /// IP address both listeners bind to.
    pub bind_addr: IpAddr,
    /// Port of the ext-authz listener.
    pub port: u16,
    /// Port of the admin listener (`/health`, `/metrics`); disabled when `None`.
    pub admin_port: Option<u16>,
    /// The credential pair the checker accepts.
    pub credentials: StaticCredentials,
    /// Whether deny bodies reveal the accepted credentials.
    pub reveal_hint: bool,
    /// Fallback log filter directive.
    pub log_level: String,
    /// Requested log format (`json` or `pretty`); inferred from the build when `None`.
    pub log_format: Option<String>,
}

impl AuthzConfig {
    /// Socket address of the ext-authz listener.
    #[must_use]
    pub const fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Socket address of the admin listener, when enabled.
    #[must_use]
    pub fn admin_addr(&self) -> Option<SocketAddr> {
        self.admin_port
            .map(|port| SocketAddr::new(self.bind_addr, port))
    }
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            port: DEFAULT_PORT,
            admin_port: None,
            credentials: StaticCredentials::default(),
            reveal_hint: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: None,
        }
    }
}
