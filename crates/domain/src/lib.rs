//! # ClubPortal Domain
//!
//! Business domain types and models for ClubPortal.
//!
//! This crate contains:
//! - Domain data types (Announcement, ClubEvent, BloodDonor, etc.)
//! - The persisted session envelope and its fail-open parser
//! - Domain error types and Result definitions
//! - Domain constants (storage keys, routes, timeouts)
//!
//! ## Architecture
//! - No dependencies on other ClubPortal crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
