//! Shared harness for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use clubportal_common::testing::{RecordingNavigator, RecordingNotifier, StaticProbe};
use clubportal_common::{KeyValueStore, MemoryStore};
use clubportal_domain::constants::SESSION_STORAGE_KEY;
use clubportal_infra::{ApiClient, ApiConfig};
use wiremock::MockServer;

/// A client wired to a wiremock backend with recording fakes for every
/// environment capability.
pub struct Harness {
    pub server: MockServer,
    pub client: ApiClient,
    pub storage: Arc<MemoryStore>,
    pub probe: Arc<StaticProbe>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    /// Start a mock backend and build a client on `route` with no session.
    pub async fn on_route(route: &str) -> Self {
        let server = MockServer::start().await;
        Self::with_backend(server, route)
    }

    /// Build a client pointed at a port nothing listens on, so every call
    /// fails at the transport layer.
    pub async fn unreachable(route: &str) -> Self {
        let server = MockServer::start().await;
        Self::build(server, "http://127.0.0.1:9".to_string(), route)
    }

    /// Build a harness over an already running mock backend.
    pub fn with_backend(server: MockServer, route: &str) -> Self {
        let base_url = server.uri();
        Self::build(server, base_url, route)
    }

    fn build(server: MockServer, base_url: String, route: &str) -> Self {
        let storage = Arc::new(MemoryStore::new());
        let probe = Arc::new(StaticProbe::new(true));
        let navigator = Arc::new(RecordingNavigator::new(route));
        let notifier = Arc::new(RecordingNotifier::new());

        let client = ApiClient::builder()
            .config(ApiConfig { base_url, ..ApiConfig::default() })
            .storage(storage.clone())
            .probe(probe.clone())
            .navigator(navigator.clone())
            .notifier(notifier.clone())
            .build()
            .unwrap();

        Self { server, client, storage, probe, navigator, notifier }
    }

    /// Write a valid session envelope for `token` into the backing store.
    pub fn log_in_as(&self, token: &str) {
        self.storage
            .set(SESSION_STORAGE_KEY, &format!(r#"{{"state":{{"token":"{token}"}}}}"#))
            .unwrap();
    }
}
