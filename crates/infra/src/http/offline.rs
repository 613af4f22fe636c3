//! Offline-aware call wrapper
//!
//! Many read endpoints should render "last known / empty" UI instead of an
//! error boundary when the device is simply offline. [`offline_tolerant`]
//! wraps an arbitrary API call so connectivity failures degrade to
//! [`CallResult::OfflineFallback`] instead of propagating; genuine (online)
//! failures still reach the caller. Write endpoints are deliberately not
//! wrapped so mutations never silently no-op.

use std::future::Future;

use clubportal_common::ConnectivityProbe;
use tracing::warn;

use super::errors::ApiError;

/// Result of an offline-aware API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResult<T> {
    /// The call completed and produced data.
    Success(T),
    /// The call could not reach the network; no data, no error raised.
    OfflineFallback,
}

impl<T> CallResult<T> {
    /// Whether this result is the offline fallback.
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::OfflineFallback)
    }

    /// Borrow the data, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::OfflineFallback => None,
        }
    }

    /// Consume the result, yielding the data if any.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::OfflineFallback => None,
        }
    }

    /// Map the success payload, preserving the fallback.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CallResult<U> {
        match self {
            Self::Success(data) => CallResult::Success(f(data)),
            Self::OfflineFallback => CallResult::OfflineFallback,
        }
    }
}

/// Wrap an API call so connectivity failures degrade to the offline
/// fallback.
///
/// The error is swallowed when the probe reports offline at failure time or
/// when the error itself is classified as a network/transport failure; a
/// transport failure is evidence of a connectivity problem the monitor has
/// not yet observed. Any other failure propagates unchanged.
///
/// This path and the response interceptor's offline resolution produce the
/// same shape; they are kept consistent by construction (both yield
/// [`CallResult::OfflineFallback`]).
pub async fn offline_tolerant<T, F>(
    probe: &dyn ConnectivityProbe,
    call: F,
) -> Result<CallResult<T>, ApiError>
where
    F: Future<Output = Result<CallResult<T>, ApiError>>,
{
    match call.await {
        Ok(result) => Ok(result),
        Err(error) if !probe.is_online() || error.is_connectivity() => {
            warn!(%error, "api call degraded to offline fallback");
            Ok(CallResult::OfflineFallback)
        }
        Err(error) => Err(error),
    }
}
