//! Announcement endpoints

use clubportal_domain::{Announcement, NewAnnouncement};

use crate::http::{offline_tolerant, ApiClient, ApiError, CallResult};

/// Fetch the announcements feed. Offline degrades to the fallback.
pub async fn list(client: &ApiClient) -> Result<CallResult<Vec<Announcement>>, ApiError> {
    offline_tolerant(client.probe().as_ref(), client.get("/announcements")).await
}

/// Publish a new announcement (admin).
pub async fn create(
    client: &ApiClient,
    announcement: &NewAnnouncement,
) -> Result<CallResult<Announcement>, ApiError> {
    client.post("/announcements", announcement).await
}

/// Update an existing announcement (admin).
pub async fn update(
    client: &ApiClient,
    id: i64,
    announcement: &NewAnnouncement,
) -> Result<CallResult<Announcement>, ApiError> {
    client.put(&format!("/announcements/{id}"), announcement).await
}

/// Delete an announcement (admin).
pub async fn delete(client: &ApiClient, id: i64) -> Result<CallResult<()>, ApiError> {
    client.delete(&format!("/announcements/{id}")).await
}
