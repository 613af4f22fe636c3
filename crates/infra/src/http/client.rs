//! HTTP client core
//!
//! The single configured client every domain API module issues calls
//! through. An explicitly constructed instance (never a global) holding the
//! base URL, default timeout and the two interceptors; tests inject fakes
//! through the builder.

use std::sync::Arc;

use clubportal_common::{
    ConnectivityProbe, KeyValueStore, Navigator, Notifier, SessionStore,
};
use reqwest::header;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ApiConfig;

use super::errors::ApiError;
use super::intercept::{GateOutcome, RequestDecorator, ResponseGate, WireOutcome};
use super::offline::CallResult;
use super::request::{RequestBody, RequestDescriptor};

/// Outcome of executing one descriptor
#[derive(Debug)]
pub enum Fetched {
    /// A response arrived and passed the gate (its status may still be 4xx).
    Online(reqwest::Response),
    /// The call degraded to the offline fallback.
    Offline,
}

/// The configured API client
///
/// Composes the request decorator and response gate around a `reqwest`
/// client with the 30-second default timeout. Per-call overrides (uploads)
/// replace the default through [`RequestDescriptor::with_timeout`].
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: SessionStore,
    probe: Arc<dyn ConnectivityProbe>,
    decorator: RequestDecorator,
    gate: ResponseGate,
}

impl ApiClient {
    /// Create a builder for fluent configuration.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Client configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Connectivity probe shared with the offline-aware wrapper.
    pub fn probe(&self) -> &Arc<dyn ConnectivityProbe> {
        &self.probe
    }

    /// Session store owning the persisted token record.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Backing key-value store; the login flow writes the session envelope
    /// through this handle.
    pub fn storage(&self) -> Arc<dyn KeyValueStore> {
        self.session.backing()
    }

    /// Execute a descriptor through both interceptors.
    ///
    /// # Errors
    /// Returns the gate's classification errors (`Auth`, `Server`) or a
    /// `Network` error for transport failures the gate chose not to
    /// suppress. Offline outcomes are `Ok(Fetched::Offline)`, never errors.
    pub async fn execute(&self, mut request: RequestDescriptor) -> Result<Fetched, ApiError> {
        self.decorator.apply(&mut request);

        let url = format!("{}{}", self.config.base_url, request.path);
        let mut builder = self.http.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => {
                let mut form = Form::new();
                for part in parts {
                    let piece = Part::bytes(part.bytes)
                        .file_name(part.file_name)
                        .mime_str(&part.mime)
                        .map_err(|e| ApiError::Config(format!("invalid mime type: {e}")))?;
                    form = form.part(part.field, piece);
                }
                builder.multipart(form)
            }
        };
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        debug!(method = %request.method, %url, "sending request");
        let result = builder.send().await;

        let outcome = match &result {
            Ok(response) => WireOutcome::Status(response.status()),
            Err(error) => WireOutcome::Transport(error.to_string()),
        };
        match self.gate.resolve(&outcome)? {
            GateOutcome::Offline => Ok(Fetched::Offline),
            GateOutcome::Proceed => match result {
                Ok(response) => Ok(Fetched::Online(response)),
                // Transport failures resolve through the gate; this arm only
                // fires if the rule list ever stops covering them.
                Err(error) => Err(error.into()),
            },
        }
    }

    /// Execute a descriptor and decode the JSON response body.
    ///
    /// # Errors
    /// `ApiError::Client` for non-success statuses the gate passed through,
    /// `ApiError::Decode` if the body cannot be deserialized.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<CallResult<T>, ApiError> {
        let path = request.path.clone();
        match self.execute(request).await? {
            Fetched::Offline => Ok(CallResult::OfflineFallback),
            Fetched::Online(response) => {
                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(ApiError::Client(if body.is_empty() {
                        format!("{path} returned status {status}")
                    } else {
                        format!("{path} returned status {status}: {body}")
                    }));
                }

                // 204/205 have no body by spec; decode from null.
                let data = if status == StatusCode::NO_CONTENT
                    || status == StatusCode::RESET_CONTENT
                {
                    serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                        ApiError::Decode(format!(
                            "no-content response from {path} cannot populate the expected type"
                        ))
                    })?
                } else {
                    response
                        .json()
                        .await
                        .map_err(|e| ApiError::Decode(format!("failed to parse response: {e}")))?
                };
                Ok(CallResult::Success(data))
            }
        }
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<CallResult<T>, ApiError> {
        self.send(RequestDescriptor::get(path)).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<CallResult<T>, ApiError> {
        self.send(RequestDescriptor::post(path, body)?).await
    }

    /// Execute a PUT request with a JSON body.
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<CallResult<T>, ApiError> {
        self.send(RequestDescriptor::put(path, body)?).await
    }

    /// Execute a DELETE request, ignoring any response body.
    pub async fn delete(&self, path: &str) -> Result<CallResult<()>, ApiError> {
        let path_owned = path.to_string();
        match self.execute(RequestDescriptor::delete(path)).await? {
            Fetched::Offline => Ok(CallResult::OfflineFallback),
            Fetched::Online(response) => {
                let status = response.status();
                if status.is_success() {
                    Ok(CallResult::Success(()))
                } else {
                    let body = response.text().await.unwrap_or_default();
                    Err(ApiError::Client(format!(
                        "{path_owned} returned status {status}: {body}"
                    )))
                }
            }
        }
    }
}

/// Builder for the API client
///
/// All four environment capabilities must be supplied; production wires the
/// real facilities, tests supply fakes.
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiConfig>,
    storage: Option<Arc<dyn KeyValueStore>>,
    probe: Option<Arc<dyn ConnectivityProbe>>,
    navigator: Option<Arc<dyn Navigator>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl ApiClientBuilder {
    /// Set the client configuration (defaults to [`ApiConfig::default`]).
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the key-value store holding the session envelope.
    pub fn storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set the connectivity probe.
    pub fn probe(mut self, probe: Arc<dyn ConnectivityProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Set the navigator used for 401 redirects.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Set the notifier used for server-fault notices.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the API client.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if a capability is missing or the
    /// underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let storage = self
            .storage
            .ok_or_else(|| ApiError::Config("storage not set".to_string()))?;
        let probe =
            self.probe.ok_or_else(|| ApiError::Config("connectivity probe not set".to_string()))?;
        let navigator =
            self.navigator.ok_or_else(|| ApiError::Config("navigator not set".to_string()))?;
        let notifier =
            self.notifier.ok_or_else(|| ApiError::Config("notifier not set".to_string()))?;

        // JSON is the wire default for every endpoint; multipart uploads and
        // explicit bodies override it per request.
        let mut default_headers = header::HeaderMap::new();
        default_headers
            .insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        let session = SessionStore::new(storage);
        let decorator = RequestDecorator::new(session.clone(), Arc::clone(&probe));
        let gate = ResponseGate::new(
            session.clone(),
            Arc::clone(&probe),
            navigator,
            notifier,
            config.admin_route_prefix.clone(),
            config.login_route.clone(),
        );

        Ok(ApiClient { http, config, session, probe, decorator, gate })
    }
}

#[cfg(test)]
mod tests {
    use clubportal_common::testing::{RecordingNavigator, RecordingNotifier, StaticProbe};
    use clubportal_common::MemoryStore;
    use clubportal_domain::constants::{CACHE_BUSTER_PARAM, SESSION_STORAGE_KEY};
    use serde::Deserialize;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        message: String,
    }

    struct Fixture {
        client: ApiClient,
        storage: Arc<MemoryStore>,
        probe: Arc<StaticProbe>,
        navigator: Arc<RecordingNavigator>,
        notifier: Arc<RecordingNotifier>,
    }

    fn fixture(base_url: &str, route: &str, token: Option<&str>) -> Fixture {
        let storage = Arc::new(MemoryStore::new());
        if let Some(token) = token {
            storage
                .set(SESSION_STORAGE_KEY, &format!(r#"{{"state":{{"token":"{token}"}}}}"#))
                .unwrap();
        }
        let probe = Arc::new(StaticProbe::new(true));
        let navigator = Arc::new(RecordingNavigator::new(route));
        let notifier = Arc::new(RecordingNotifier::new());

        let client = ApiClient::builder()
            .config(ApiConfig { base_url: base_url.to_string(), ..ApiConfig::default() })
            .storage(storage.clone())
            .probe(probe.clone())
            .navigator(navigator.clone())
            .notifier(notifier.clone())
            .build()
            .unwrap();

        Fixture { client, storage, probe, navigator, notifier }
    }

    #[tokio::test]
    async fn test_builder_requires_capabilities() {
        assert!(matches!(ApiClient::builder().build(), Err(ApiError::Config(_))));
    }

    #[tokio::test]
    async fn test_get_sends_bearer_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .and(header("Authorization", "Bearer tok-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})),
            )
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), "/events", Some("tok-1"));
        let result: CallResult<Payload> = fx.client.get("/events").await.unwrap();
        assert_eq!(result.into_data().unwrap().message, "ok");
    }

    #[tokio::test]
    async fn test_bodyless_requests_carry_default_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})),
            )
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), "/events", None);
        let _: CallResult<Payload> = fx.client.get("/events").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok());
        assert_eq!(content_type, Some("application/json"));
    }

    #[tokio::test]
    async fn test_get_without_session_sends_no_auth_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})),
            )
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), "/events", None);
        let _: CallResult<Payload> = fx.client.get("/events").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn test_malformed_envelope_degrades_to_anonymous_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})),
            )
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), "/events", None);
        fx.storage.set(SESSION_STORAGE_KEY, "not json").unwrap();

        let result: Result<CallResult<Payload>, _> = fx.client.get("/events").await;
        assert!(result.is_ok());

        let requests = server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn test_cache_buster_on_reads_varies_per_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})),
            )
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), "/events", None);
        let _: CallResult<Payload> = fx.client.get("/events").await.unwrap();
        let _: CallResult<Payload> = fx.client.get("/events").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let busters: Vec<String> = requests
            .iter()
            .map(|r| {
                r.url
                    .query_pairs()
                    .find(|(name, _)| name == CACHE_BUSTER_PARAM)
                    .map(|(_, value)| value.to_string())
                    .unwrap()
            })
            .collect();
        assert_eq!(busters.len(), 2);
        assert_ne!(busters[0], busters[1]);
    }

    #[tokio::test]
    async fn test_writes_never_carry_cache_buster() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/events"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})),
            )
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), "/events", None);
        let _: CallResult<Payload> =
            fx.client.post("/events", &serde_json::json!({"title": "AGM"})).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0]
            .url
            .query_pairs()
            .all(|(name, _)| name != CACHE_BUSTER_PARAM));
    }

    #[tokio::test]
    async fn test_offline_resolves_to_fallback_before_any_classification() {
        let server = MockServer::start().await;
        // Even a reachable server answering 401 must not surface while the
        // probe reports offline.
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), "/admin/events", Some("tok-1"));
        fx.probe.set_online(false);

        let result: CallResult<Payload> = fx.client.get("/events").await.unwrap();
        assert!(result.is_offline());
        assert_eq!(fx.client.session().read(), Some("tok-1".to_string()));
        assert!(fx.navigator.replacements().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_while_online_degrades_to_fallback() {
        // Nothing listens on port 9 (discard); connection is refused.
        let fx = fixture("http://127.0.0.1:9", "/events", None);

        let result: CallResult<Payload> = fx.client.get("/events").await.unwrap();
        assert!(result.is_offline());
        assert_eq!(fx.notifier.server_error_count(), 0);
    }

    #[tokio::test]
    async fn test_401_on_admin_route_clears_session_and_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/members"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), "/admin/members", Some("tok-1"));
        let result: Result<CallResult<Payload>, _> = fx.client.get("/members").await;

        assert!(matches!(result, Err(ApiError::Auth(_))));
        assert_eq!(fx.client.session().read(), None);
        assert_eq!(fx.navigator.replacements(), vec!["/admin/login".to_string()]);
    }

    #[tokio::test]
    async fn test_401_on_public_route_clears_session_without_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/members"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), "/blood-donors", Some("tok-1"));
        let result: Result<CallResult<Payload>, _> = fx.client.get("/members").await;

        assert!(matches!(result, Err(ApiError::Auth(_))));
        assert_eq!(fx.client.session().read(), None);
        assert!(fx.navigator.replacements().is_empty());
    }

    #[tokio::test]
    async fn test_500_online_shows_single_notice_and_rejects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), "/events", None);
        let result: Result<CallResult<Payload>, _> = fx.client.get("/events").await;

        assert!(matches!(result, Err(ApiError::Server(_))));
        assert_eq!(fx.notifier.server_error_count(), 1);
    }

    #[tokio::test]
    async fn test_404_passes_through_as_client_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), "/events", None);
        let result: Result<CallResult<Payload>, _> = fx.client.get("/missing").await;

        assert!(matches!(result, Err(ApiError::Client(_))));
        assert_eq!(fx.notifier.server_error_count(), 0);
        assert!(fx.navigator.replacements().is_empty());
    }

    #[tokio::test]
    async fn test_delete_returns_unit_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/events/7"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), "/admin/events", None);
        let result = fx.client.delete("/events/7").await.unwrap();
        assert_eq!(result, CallResult::Success(()));
    }
}
