//! Blood-donor directory endpoints

use clubportal_domain::{BloodDonor, NewBloodDonor};

use crate::http::{offline_tolerant, ApiClient, ApiError, CallResult};

/// Fetch the public donor directory. Offline degrades to the fallback.
pub async fn list(client: &ApiClient) -> Result<CallResult<Vec<BloodDonor>>, ApiError> {
    offline_tolerant(client.probe().as_ref(), client.get("/blood-donors")).await
}

/// Fetch donors with a given blood group. Offline degrades to the fallback.
pub async fn list_by_group(
    client: &ApiClient,
    blood_group: &str,
) -> Result<CallResult<Vec<BloodDonor>>, ApiError> {
    let path = format!("/blood-donors/group/{blood_group}");
    offline_tolerant(client.probe().as_ref(), client.get(&path)).await
}

/// Register a donor (admin).
pub async fn create(
    client: &ApiClient,
    donor: &NewBloodDonor,
) -> Result<CallResult<BloodDonor>, ApiError> {
    client.post("/blood-donors", donor).await
}

/// Update a donor record (admin).
pub async fn update(
    client: &ApiClient,
    id: i64,
    donor: &NewBloodDonor,
) -> Result<CallResult<BloodDonor>, ApiError> {
    client.put(&format!("/blood-donors/{id}"), donor).await
}

/// Remove a donor from the directory (admin).
pub async fn delete(client: &ApiClient, id: i64) -> Result<CallResult<()>, ApiError> {
    client.delete(&format!("/blood-donors/{id}")).await
}
