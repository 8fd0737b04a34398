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

//! HTTP surface of the authorization checker.
//!
//! The ext-authz listener sends every method and path through the checker.
//! Health and metrics live on a separate admin listener so they never shadow
//! a proxied path.

pub mod bootstrap;
pub mod error;
pub mod http;
pub mod observer;
pub mod state;

pub use bootstrap::build_checker;
pub use error::{ApiServerError, ApiServerResult};
pub use http::router::{AdminServer, AuthzServer};
pub use observer::MetricsObserver;
pub use state::{AdminState, AuthzState};
