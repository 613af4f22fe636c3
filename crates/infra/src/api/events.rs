//! Event endpoints (courses and exams are published as events)

use clubportal_domain::{ClubEvent, NewClubEvent};

use crate::http::{offline_tolerant, ApiClient, ApiError, CallResult};

/// Fetch upcoming events. Offline degrades to the fallback.
pub async fn list(client: &ApiClient) -> Result<CallResult<Vec<ClubEvent>>, ApiError> {
    offline_tolerant(client.probe().as_ref(), client.get("/events")).await
}

/// Fetch one event by id. Offline degrades to the fallback.
pub async fn get(client: &ApiClient, id: i64) -> Result<CallResult<ClubEvent>, ApiError> {
    let path = format!("/events/{id}");
    offline_tolerant(client.probe().as_ref(), client.get(&path)).await
}

/// Create an event (admin).
pub async fn create(
    client: &ApiClient,
    event: &NewClubEvent,
) -> Result<CallResult<ClubEvent>, ApiError> {
    client.post("/events", event).await
}

/// Update an event (admin).
pub async fn update(
    client: &ApiClient,
    id: i64,
    event: &NewClubEvent,
) -> Result<CallResult<ClubEvent>, ApiError> {
    client.put(&format!("/events/{id}"), event).await
}

/// Delete an event (admin).
pub async fn delete(client: &ApiClient, id: i64) -> Result<CallResult<()>, ApiError> {
    client.delete(&format!("/events/{id}")).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use clubportal_common::testing::{RecordingNavigator, RecordingNotifier, StaticProbe};
    use clubportal_common::MemoryStore;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;

    fn client_for(server_uri: &str, probe: Arc<StaticProbe>) -> ApiClient {
        ApiClient::builder()
            .config(ApiConfig { base_url: server_uri.to_string(), ..ApiConfig::default() })
            .storage(Arc::new(MemoryStore::new()))
            .probe(probe)
            .navigator(Arc::new(RecordingNavigator::new("/events")))
            .notifier(Arc::new(RecordingNotifier::new()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_parses_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "id": 1,
                "title": "Annual general meeting",
                "description": "All members welcome",
                "location": "Clubhouse",
                "starts_at": "2026-09-12T18:00:00Z",
                "ends_at": null
            }])))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Arc::new(StaticProbe::new(true)));
        let events = list(&client).await.unwrap().into_data().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Annual general meeting");
    }

    #[tokio::test]
    async fn test_list_while_offline_returns_fallback() {
        let probe = Arc::new(StaticProbe::new(false));
        // Unroutable backend: the wrapper must swallow the failure.
        let client = client_for("http://127.0.0.1:9", probe);

        let result = list(&client).await.unwrap();
        assert!(result.is_offline());
    }
}
