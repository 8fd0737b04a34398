//! The Basic-auth checker.
//!
//! # Design
//!
//! - `check` is a pure function of the request headers and the injected provider.
//! - Every failure (missing header, bad scheme, bad encoding, mismatch) collapses
//!   into the same `Denied` decision.
//! - The deny body is rendered once at construction.

use std::fmt;
use std::sync::Arc;

use http::{HeaderMap, Request, StatusCode};

use crate::credentials::extract_basic;
use crate::decision::Decision;
use crate::observe::{DecisionObserver, RequestMetadata};
use crate::provider::CredentialProvider;

const UNAUTHORIZED_BODY: &str = "Unauthorized";

/// Evaluates Basic credentials against an injected [`CredentialProvider`].
pub struct BasicAuthChecker {
    provider: Arc<dyn CredentialProvider>,
    deny_body: String,
    observers: Vec<Arc<dyn DecisionObserver>>,
}

impl BasicAuthChecker {
    /// Build a checker. When `reveal_hint` is set and the provider has a hint,
    /// deny bodies read `Unauthorized - hint: credentials are <hint>`.
    #[must_use]
    pub fn new(provider: Arc<dyn CredentialProvider>, reveal_hint: bool) -> Self {
        let deny_body = match provider.hint().filter(|_| reveal_hint) {
            Some(hint) => format!("{UNAUTHORIZED_BODY} - hint: credentials are {hint}"),
            None => UNAUTHORIZED_BODY.to_string(),
        };
        Self {
            provider,
            deny_body,
            observers: Vec::new(),
        }
    }

    /// Register an observer notified after every decision.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn DecisionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Body returned with every denied request.
    #[must_use]
    pub fn deny_body(&self) -> &str {
        &self.deny_body
    }

    /// Evaluate one request and notify observers. The body is never read.
    #[must_use]
    pub fn check<B>(&self, request: &Request<B>) -> Decision {
        let decision = self.decide(request.headers());
        if !self.observers.is_empty() {
            let metadata = RequestMetadata::from_request(request);
            for observer in &self.observers {
                observer.observe(&metadata, &decision);
            }
        }
        decision
    }

    /// Evaluate a header map without notifying observers.
    #[must_use]
    pub fn decide(&self, headers: &HeaderMap) -> Decision {
        match extract_basic(headers) {
            Ok(credentials) if self.provider.verify(&credentials) => Decision::Allowed {
                identity: credentials.into_username(),
            },
            Ok(_) | Err(_) => self.deny(),
        }
    }

    fn deny(&self) -> Decision {
        Decision::Denied {
            status: StatusCode::UNAUTHORIZED,
            body: self.deny_body.clone(),
        }
    }
}

impl fmt::Debug for BasicAuthChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthChecker")
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use http::header::AUTHORIZATION;

    use crate::provider::StaticCredentials;

    const HINT_BODY: &str = "Unauthorized - hint: credentials are kubeshop:kubeshop";

    fn checker() -> BasicAuthChecker {
        BasicAuthChecker::new(Arc::new(StaticCredentials::default()), true)
    }

    fn request(authorization: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().uri("/anything");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).expect("request")
    }

    fn denied() -> Decision {
        Decision::Denied {
            status: StatusCode::UNAUTHORIZED,
            body: HINT_BODY.to_string(),
        }
    }

    #[test]
    fn valid_credentials_are_allowed() {
        let decision = checker().check(&request(Some("Basic a3ViZXNob3A6a3ViZXNob3A=")));
        assert_eq!(
            decision,
            Decision::Allowed {
                identity: "kubeshop".to_string()
            }
        );
    }

    #[test]
    fn wrong_credentials_are_denied() {
        let decision = checker().check(&request(Some("Basic YWRtaW46d3Jvbmc=")));
        assert_eq!(decision, denied());
    }

    #[test]
    fn one_correct_field_is_not_enough() {
        // kubeshop:wrong and Kubeshop:kubeshop
        for value in ["Basic a3ViZXNob3A6d3Jvbmc=", "Basic S3ViZXNob3A6a3ViZXNob3A="] {
            assert_eq!(checker().check(&request(Some(value))), denied());
        }
    }

    #[test]
    fn near_miss_username_is_denied() {
        // decodes to "kubshop:kubeshop"
        let decision = checker().check(&request(Some("Basic a3Vic2hvcDprdWJlc2hvcA==")));
        assert_eq!(decision, denied());
    }

    #[test]
    fn missing_header_is_denied() {
        assert_eq!(checker().check(&request(None)), denied());
    }

    #[test]
    fn wrong_scheme_is_denied() {
        assert_eq!(
            checker().check(&request(Some("Bearer sometoken"))),
            denied()
        );
    }

    #[test]
    fn malformed_payloads_are_denied() {
        for value in ["Basic !!!notbase64!!!", "Basic a3ViZXNob3A=", "Basic", "   "] {
            assert_eq!(checker().check(&request(Some(value))), denied());
        }
    }

    #[test]
    fn check_is_idempotent() {
        let checker = checker();
        let allowed = request(Some("Basic a3ViZXNob3A6a3ViZXNob3A="));
        let rejected = request(Some("Basic YWRtaW46d3Jvbmc="));
        assert_eq!(checker.check(&allowed), checker.check(&allowed));
        assert_eq!(checker.check(&rejected), checker.check(&rejected));
    }

    #[test]
    fn injected_credentials_replace_the_default_pair() {
        let checker = BasicAuthChecker::new(Arc::new(StaticCredentials::new("kusk", "kusk")), true);
        assert_eq!(
            checker.deny_body(),
            "Unauthorized - hint: credentials are kusk:kusk"
        );
        assert!(
            !checker
                .check(&request(Some("Basic a3ViZXNob3A6a3ViZXNob3A=")))
                .is_allowed()
        );
        // kusk:kusk
        assert!(
            checker
                .check(&request(Some("Basic a3VzazprdXNr")))
                .is_allowed()
        );
    }

    #[test]
    fn hint_can_be_suppressed() {
        let checker = BasicAuthChecker::new(Arc::new(StaticCredentials::default()), false);
        assert_eq!(
            checker.check(&request(None)),
            Decision::Denied {
                status: StatusCode::UNAUTHORIZED,
                body: "Unauthorized".to_string(),
            }
        );
    }

    #[derive(Default)]
    struct RecordingObserver {
        seen: Mutex<Vec<(RequestMetadata, &'static str)>>,
    }

    impl DecisionObserver for RecordingObserver {
        fn observe(&self, request: &RequestMetadata, decision: &Decision) {
            self.seen
                .lock()
                .expect("observer lock")
                .push((request.clone(), decision.outcome()));
        }
    }

    #[test]
    fn observers_receive_metadata_and_outcome() {
        let observer = Arc::new(RecordingObserver::default());
        let checker = checker().with_observer(observer.clone());

        let _ = checker.check(&request(Some("Basic a3ViZXNob3A6a3ViZXNob3A=")));
        let _ = checker.check(&request(None));

        let seen = observer.seen.lock().expect("observer lock");
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0.path, "/anything");
        assert_eq!(seen[0].1, "allowed");
        assert_eq!(seen[1].1, "denied");
    }

    #[test]
    fn decide_does_not_notify_observers() {
        let observer = Arc::new(RecordingObserver::default());
        let checker = checker().with_observer(observer.clone());
        let _ = checker.decide(&HeaderMap::new());
        assert!(observer.seen.lock().expect("observer lock").is_empty());
    }
}
