//! Domain API modules
//!
//! Thin endpoint groupings built on the HTTP client core, one module per
//! backend resource. Read-oriented functions are wrapped with
//! [`crate::http::offline_tolerant`] so pages render "last known / empty"
//! instead of an error boundary when the device is offline; write-oriented
//! functions are not wrapped, so mutations never silently no-op.

pub mod announcements;
pub mod auth;
pub mod blood;
pub mod donations;
pub mod events;
pub mod moments;
pub mod slider;
pub mod uploads;
