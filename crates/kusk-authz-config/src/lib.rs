#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Environment-backed configuration for the authorization checker.
//!
//! Layout: `model.rs` (typed configuration and defaults), `validate.rs`
//! (value parsing), `loader.rs` (environment lookup and secret files).

pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    ENV_ADMIN_PORT, ENV_BIND_ADDR, ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_PASSWORD, ENV_PASSWORD_FILE,
    ENV_PORT, ENV_REVEAL_HINT, ENV_USERNAME,
};
pub use model::{AuthzConfig, DEFAULT_BIND_ADDR, DEFAULT_LOG_LEVEL, DEFAULT_PORT};
