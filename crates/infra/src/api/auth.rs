//! Authentication endpoints
//!
//! Login writes the session envelope directly through the client's backing
//! store on success; the session store itself only reads and clears. Logout
//! is a purely local operation (the backend keeps no session state).

use clubportal_common::KeyValueStore;
use clubportal_domain::constants::SESSION_STORAGE_KEY;
use clubportal_domain::{Credentials, LoginResponse, SessionEnvelope};
use tracing::info;

use crate::http::{ApiClient, ApiError, CallResult};

/// Authenticate against the backend and persist the returned token.
///
/// Offline degrades to [`CallResult::OfflineFallback`] like every other
/// call; nothing is persisted in that case.
///
/// # Errors
/// `ApiError::Client` for rejected credentials, `ApiError::Storage` if the
/// envelope cannot be persisted.
pub async fn login(
    client: &ApiClient,
    credentials: &Credentials,
) -> Result<CallResult<LoginResponse>, ApiError> {
    let result: CallResult<LoginResponse> = client.post("/auth/login", credentials).await?;

    if let CallResult::Success(response) = &result {
        persist_session(client.storage().as_ref(), &response.token)?;
        info!("login succeeded; session persisted");
    }

    Ok(result)
}

/// Remove the persisted session.
///
/// # Errors
/// `ApiError::Storage` if the backing store fails.
pub fn logout(client: &ApiClient) -> Result<(), ApiError> {
    client
        .session()
        .clear()
        .map_err(|e| ApiError::Storage(format!("failed to clear session: {e}")))?;
    info!("logged out; session cleared");
    Ok(())
}

/// Serialize and store the session envelope under its well-known key.
fn persist_session(store: &dyn KeyValueStore, token: &str) -> Result<(), ApiError> {
    let raw = serde_json::to_string(&SessionEnvelope::new(token))
        .map_err(|e| ApiError::Storage(format!("failed to serialize session: {e}")))?;
    store
        .set(SESSION_STORAGE_KEY, &raw)
        .map_err(|e| ApiError::Storage(format!("failed to persist session: {e}")))
}
