//! Resilient HTTP access layer
//!
//! One configured client, two interceptors, one offline-aware wrapper:
//!
//! - [`client::ApiClient`]: the explicitly constructed client core
//! - [`intercept`]: request decoration and the ordered response rule list
//! - [`offline`]: the `CallResult` shape and `offline_tolerant` wrapper
//! - [`request`]: the per-call request descriptor
//! - [`errors`]: error taxonomy and connectivity classification

pub mod client;
pub mod errors;
pub mod intercept;
pub mod offline;
pub mod request;

pub use client::{ApiClient, ApiClientBuilder, Fetched};
pub use errors::{ApiError, ApiErrorCategory};
pub use intercept::{classify, RequestDecorator, ResponseGate, ResponseRule, RESPONSE_RULES};
pub use offline::{offline_tolerant, CallResult};
pub use request::{FilePart, RequestBody, RequestDescriptor};
