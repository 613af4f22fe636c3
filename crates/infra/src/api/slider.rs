//! Home-page slider endpoints

use clubportal_domain::{NewSliderImage, SliderImage};

use crate::http::{offline_tolerant, ApiClient, ApiError, CallResult};

/// Fetch the slider images in display order. Offline degrades to the
/// fallback.
pub async fn list(client: &ApiClient) -> Result<CallResult<Vec<SliderImage>>, ApiError> {
    offline_tolerant(client.probe().as_ref(), client.get("/slider")).await
}

/// Add an image to the slider (admin).
pub async fn create(
    client: &ApiClient,
    image: &NewSliderImage,
) -> Result<CallResult<SliderImage>, ApiError> {
    client.post("/slider", image).await
}

/// Remove an image from the slider (admin).
pub async fn delete(client: &ApiClient, id: i64) -> Result<CallResult<()>, ApiError> {
    client.delete(&format!("/slider/{id}")).await
}
