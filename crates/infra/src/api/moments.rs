//! Historical-moments gallery endpoints

use clubportal_domain::{HistoricalMoment, NewHistoricalMoment};

use crate::http::{offline_tolerant, ApiClient, ApiError, CallResult};

/// Fetch the historical-moments gallery. Offline degrades to the fallback.
pub async fn list(client: &ApiClient) -> Result<CallResult<Vec<HistoricalMoment>>, ApiError> {
    offline_tolerant(client.probe().as_ref(), client.get("/historical-moments")).await
}

/// Add a moment to the gallery (admin).
pub async fn create(
    client: &ApiClient,
    moment: &NewHistoricalMoment,
) -> Result<CallResult<HistoricalMoment>, ApiError> {
    client.post("/historical-moments", moment).await
}

/// Remove a moment from the gallery (admin).
pub async fn delete(client: &ApiClient, id: i64) -> Result<CallResult<()>, ApiError> {
    client.delete(&format!("/historical-moments/{id}")).await
}
