//! # ClubPortal Infrastructure
//!
//! The resilient API access layer every page of the club-management
//! application calls through.
//!
//! This crate contains:
//! - The HTTP client core with its request/response interceptors
//! - The offline-aware call wrapper and `CallResult` shape
//! - Configuration loading
//! - Domain API modules (auth, announcements, events, uploads, ...)
//!
//! ## Architecture
//! - Environment couplings (storage, connectivity, navigation, notices) are
//!   injected as `clubportal-common` capability traits
//! - One explicitly constructed client instance, no ambient globals
//! - No retry, no backoff, no request deduplication: failures surface fast
//!   or degrade to the offline fallback, never both

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod api;
pub mod config;
pub mod http;

// Re-export commonly used items
pub use config::ApiConfig;
pub use http::{
    offline_tolerant, ApiClient, ApiClientBuilder, ApiError, ApiErrorCategory, CallResult,
    FilePart, RequestDescriptor,
};
