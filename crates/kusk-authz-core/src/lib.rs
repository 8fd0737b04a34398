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

//! HTTP Basic external-authorization checker.
//!
//! Layout: `credentials.rs` (header parsing), `provider.rs` (credential
//! verification capability), `decision.rs` (allow/deny outcome),
//! `observe.rs` (redacted decision observers), `checker.rs` (`BasicAuthChecker`).

pub mod checker;
pub mod credentials;
pub mod decision;
pub mod error;
pub mod observe;
pub mod provider;

pub use checker::BasicAuthChecker;
pub use credentials::{Credentials, extract_basic, parse_basic};
pub use decision::{Decision, IDENTITY_HEADER};
pub use error::{CredentialError, CredentialResult};
pub use observe::{DecisionObserver, HEADER_REQUEST_ID, RequestMetadata, TracingObserver};
pub use provider::{CredentialProvider, DEFAULT_PASSWORD, DEFAULT_USERNAME, StaticCredentials};
