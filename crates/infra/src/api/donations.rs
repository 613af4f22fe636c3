//! Donation endpoints

use clubportal_domain::{Donation, NewDonation};

use crate::http::{offline_tolerant, ApiClient, ApiError, CallResult};

/// Fetch the donation history. Offline degrades to the fallback.
pub async fn list(client: &ApiClient) -> Result<CallResult<Vec<Donation>>, ApiError> {
    offline_tolerant(client.probe().as_ref(), client.get("/donations")).await
}

/// Record a donation (admin).
pub async fn create(
    client: &ApiClient,
    donation: &NewDonation,
) -> Result<CallResult<Donation>, ApiError> {
    client.post("/donations", donation).await
}
