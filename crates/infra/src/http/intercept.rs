//! Request and response interceptors
//!
//! Every outgoing request passes through the [`RequestDecorator`] (bearer
//! token injection, cache-defeating parameter for online reads) and every
//! outcome through the [`ResponseGate`], which evaluates an explicit,
//! ordered rule list. The order is a contract, not an accident of
//! registration: the offline check runs before the 401 check before the 5xx
//! check, so an offline 401 is reported as offline rather than as an auth
//! failure (the 401 may be stale/cached and not reflect true server state).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use clubportal_common::{ConnectivityProbe, Navigator, Notice, Notifier, SessionStore};
use clubportal_domain::constants::CACHE_BUSTER_PARAM;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::errors::ApiError;
use super::request::RequestDescriptor;

/// Rules applied to every response/transport outcome, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseRule {
    /// Connectivity state is offline: resolve to the offline fallback.
    OfflineShortCircuit,
    /// Transport failure while nominally online: treat as offline evidence.
    TransportAsOffline,
    /// HTTP 401: invalidate the session, redirect admin routes to login.
    SessionExpired,
    /// HTTP 5xx while online: notify the user, reject to the caller.
    ServerFault,
    /// Everything else passes through unmodified.
    PassThrough,
}

/// The fixed evaluation order for response classification
pub const RESPONSE_RULES: [ResponseRule; 5] = [
    ResponseRule::OfflineShortCircuit,
    ResponseRule::TransportAsOffline,
    ResponseRule::SessionExpired,
    ResponseRule::ServerFault,
    ResponseRule::PassThrough,
];

/// Transport-level outcome of a request attempt, before classification
#[derive(Debug)]
pub enum WireOutcome {
    /// The server answered with a status code.
    Status(StatusCode),
    /// The request never produced a response (connect failure, DNS, abort).
    Transport(String),
}

/// Classification verdict for one outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Resolve to the offline fallback instead of rejecting.
    Offline,
    /// Clear the session; redirect if on an admin route.
    SessionExpired,
    /// Show the server-error notice and reject.
    ServerFault(u16),
    /// Hand the outcome to the caller unmodified.
    Pass,
}

impl ResponseRule {
    /// Whether this rule decides the given outcome, and with what verdict.
    fn evaluate(self, outcome: &WireOutcome, online: bool) -> Option<Verdict> {
        match self {
            Self::OfflineShortCircuit => (!online).then_some(Verdict::Offline),
            Self::TransportAsOffline => match outcome {
                WireOutcome::Transport(_) => Some(Verdict::Offline),
                WireOutcome::Status(_) => None,
            },
            Self::SessionExpired => match outcome {
                WireOutcome::Status(status) if *status == StatusCode::UNAUTHORIZED => {
                    Some(Verdict::SessionExpired)
                }
                _ => None,
            },
            Self::ServerFault => match outcome {
                WireOutcome::Status(status) if status.is_server_error() => {
                    Some(Verdict::ServerFault(status.as_u16()))
                }
                _ => None,
            },
            Self::PassThrough => Some(Verdict::Pass),
        }
    }
}

/// Classify an outcome by walking [`RESPONSE_RULES`] in order.
pub fn classify(outcome: &WireOutcome, online: bool) -> Verdict {
    for rule in RESPONSE_RULES {
        if let Some(verdict) = rule.evaluate(outcome, online) {
            return verdict;
        }
    }
    // PassThrough always matches.
    Verdict::Pass
}

/// Request interceptor
///
/// Mutates every outgoing descriptor: injects the bearer token when a
/// session exists and merges a per-request cache-defeating parameter into
/// online reads. Storage faults degrade to an anonymous request; they never
/// abort the call.
pub struct RequestDecorator {
    session: SessionStore,
    probe: Arc<dyn ConnectivityProbe>,
    sequence: AtomicU64,
}

impl RequestDecorator {
    /// Create a decorator over the given session store and probe.
    pub fn new(session: SessionStore, probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self { session, probe, sequence: AtomicU64::new(0) }
    }

    /// Apply both request-stage mutations in order.
    pub fn apply(&self, request: &mut RequestDescriptor) {
        // SessionStore::read is fail-open, so a malformed envelope simply
        // skips the header.
        if let Some(token) = self.session.read() {
            request.headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        if self.probe.is_online() && request.is_read() {
            request
                .query
                .push((CACHE_BUSTER_PARAM.to_string(), self.next_cache_buster()));
        }
    }

    /// Produce a value that differs between any two calls, even within the
    /// same millisecond.
    fn next_cache_buster(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", Utc::now().timestamp_millis(), seq)
    }
}

/// Response interceptor
///
/// Executes the actions attached to each verdict: offline resolution,
/// session invalidation with conditional redirect, and the one-shot server
/// error notice.
pub struct ResponseGate {
    session: SessionStore,
    probe: Arc<dyn ConnectivityProbe>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    admin_route_prefix: String,
    login_route: String,
}

/// Resolution of one response outcome
#[derive(Debug)]
pub enum GateOutcome {
    /// The response should be handed to the caller (may still be a 4xx).
    Proceed,
    /// The call degrades to the offline fallback shape.
    Offline,
}

impl ResponseGate {
    /// Create a gate over the injected capabilities.
    pub fn new(
        session: SessionStore,
        probe: Arc<dyn ConnectivityProbe>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        admin_route_prefix: impl Into<String>,
        login_route: impl Into<String>,
    ) -> Self {
        Self {
            session,
            probe,
            navigator,
            notifier,
            admin_route_prefix: admin_route_prefix.into(),
            login_route: login_route.into(),
        }
    }

    /// Classify one outcome and run the matched rule's actions.
    ///
    /// # Errors
    /// Returns `ApiError::Auth` for 401 outcomes and `ApiError::Server` for
    /// online 5xx outcomes. Offline outcomes are not errors.
    pub fn resolve(&self, outcome: &WireOutcome) -> Result<GateOutcome, ApiError> {
        let online = self.probe.is_online();
        match classify(outcome, online) {
            Verdict::Offline => {
                match outcome {
                    WireOutcome::Transport(error) => {
                        warn!(%error, "transport failure; degrading to offline fallback")
                    }
                    WireOutcome::Status(status) => {
                        debug!(%status, "response received while offline; degrading to fallback")
                    }
                }
                Ok(GateOutcome::Offline)
            }
            Verdict::SessionExpired => {
                if let Err(error) = self.session.clear() {
                    warn!(%error, "failed to clear session after 401");
                }
                self.redirect_admin_to_login();
                Err(ApiError::Auth("session expired or invalid (401)".to_string()))
            }
            Verdict::ServerFault(status) => {
                self.notifier.show(Notice::ServerError { status });
                Err(ApiError::Server(format!("server returned status {status}")))
            }
            Verdict::Pass => Ok(GateOutcome::Proceed),
        }
    }

    /// Force navigation to the login route, but only from admin-scoped
    /// routes that are not already the login route. Unauthenticated browsing
    /// of public pages must not be interrupted.
    fn redirect_admin_to_login(&self) {
        let current = self.navigator.current_path();
        if current.starts_with(&self.admin_route_prefix) && current != self.login_route {
            info!(from = %current, "session expired on admin route; redirecting to login");
            self.navigator.replace(&self.login_route);
        }
    }
}
