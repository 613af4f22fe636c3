//! Configuration loader
//!
//! Loads the API client configuration from environment variables with
//! sensible defaults for everything but the base URL.
//!
//! ## Environment Variables
//! - `CLUBPORTAL_API_BASE_URL`: Base URL of the REST backend (required)
//! - `CLUBPORTAL_API_TIMEOUT_SECS`: Default request timeout (default: 30)
//! - `CLUBPORTAL_UPLOAD_TIMEOUT_SECS`: Single-file upload timeout
//!   (default: 120)
//! - `CLUBPORTAL_MULTI_UPLOAD_TIMEOUT_SECS`: Multi-file upload timeout
//!   (default: 180)

use std::time::Duration;

use clubportal_domain::constants::{
    ADMIN_ROUTE_PREFIX, DEFAULT_TIMEOUT_SECS, LOGIN_ROUTE, MULTI_UPLOAD_TIMEOUT_SECS,
    UPLOAD_TIMEOUT_SECS,
};
use clubportal_domain::{ClubPortalError, Result};

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL for the REST backend (e.g. `https://api.club.example/v1`).
    pub base_url: String,
    /// Default timeout applied to every request.
    pub timeout: Duration,
    /// Timeout override for single-file uploads.
    pub upload_timeout: Duration,
    /// Timeout override for multi-file uploads.
    pub multi_upload_timeout: Duration,
    /// Route prefix identifying admin-scoped pages.
    pub admin_route_prefix: String,
    /// Route of the admin login page (401 redirect target).
    pub login_route: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(UPLOAD_TIMEOUT_SECS),
            multi_upload_timeout: Duration::from_secs(MULTI_UPLOAD_TIMEOUT_SECS),
            admin_route_prefix: ADMIN_ROUTE_PREFIX.to_string(),
            login_route: LOGIN_ROUTE.to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns `ClubPortalError::Config` if `CLUBPORTAL_API_BASE_URL` is
    /// missing or a timeout variable has an invalid value.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("CLUBPORTAL_API_BASE_URL").map_err(|_| {
            ClubPortalError::Config("CLUBPORTAL_API_BASE_URL is not set".to_string())
        })?;

        let mut config = Self { base_url, ..Self::default() };
        if let Some(secs) = env_secs("CLUBPORTAL_API_TIMEOUT_SECS")? {
            config.timeout = secs;
        }
        if let Some(secs) = env_secs("CLUBPORTAL_UPLOAD_TIMEOUT_SECS")? {
            config.upload_timeout = secs;
        }
        if let Some(secs) = env_secs("CLUBPORTAL_MULTI_UPLOAD_TIMEOUT_SECS")? {
            config.multi_upload_timeout = secs;
        }

        tracing::info!(base_url = %config.base_url, "configuration loaded from environment");
        Ok(config)
    }
}

fn env_secs(name: &str) -> Result<Option<Duration>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|e| ClubPortalError::Config(format!("invalid value for {name}: {e}"))),
        Err(_) => Ok(None),
    }
}
