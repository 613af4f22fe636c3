//! API-specific error types
//!
//! Provides error classification for API operations. The access layer's
//! propagation policy: the lowest layer that can conclusively classify an
//! error handles it (offline suppression, 401 session clearing); everything
//! else travels upward untouched as one of these variants.

use clubportal_domain::ClubPortalError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401) - session was invalidated locally
    Authentication,
    /// Server errors (5xx) - surfaced to the user as a transient notice
    Server,
    /// Client errors (4xx except 401) - passed through for callers to handle
    Client,
    /// Network/connection errors - candidates for offline degradation
    Network,
    /// Storage faults while persisting the session
    Storage,
    /// Configuration errors - non-recoverable
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Response decode error: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) | Self::Decode(_) => ApiErrorCategory::Client,
            Self::Network(_) => ApiErrorCategory::Network,
            Self::Storage(_) => ApiErrorCategory::Storage,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Whether this error is evidence of a connectivity problem
    ///
    /// Connectivity-classified failures are the ones the offline-aware
    /// wrapper swallows into `CallResult::OfflineFallback`.
    pub fn is_connectivity(&self) -> bool {
        self.category() == ApiErrorCategory::Network
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            // Connect failures, timeouts and aborted transfers all count as
            // network-level evidence of a connectivity problem.
            Self::Network(err.to_string())
        }
    }
}

impl From<ApiError> for ClubPortalError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => Self::Auth(message),
            ApiError::Server(message) => Self::Server(message),
            ApiError::Client(message) | ApiError::Decode(message) => Self::Client(message),
            ApiError::Network(message) => Self::Network(message),
            ApiError::Storage(message) => Self::Storage(message),
            ApiError::Config(message) => Self::Config(message),
        }
    }
}
