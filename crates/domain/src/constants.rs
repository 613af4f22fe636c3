//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Client-side storage keys
pub const SESSION_STORAGE_KEY: &str = "clubportal-auth";
pub const OFFLINE_FLAG_KEY: &str = "clubportal-was-offline";
pub const OFFLINE_FLAG_VALUE: &str = "1";

// Routing
pub const ADMIN_ROUTE_PREFIX: &str = "/admin";
pub const LOGIN_ROUTE: &str = "/admin/login";

// Request timeouts
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const UPLOAD_TIMEOUT_SECS: u64 = 120;
pub const MULTI_UPLOAD_TIMEOUT_SECS: u64 = 180;

// Connectivity banner
pub const BACK_ONLINE_NOTICE_SECS: u64 = 3;

// Cache-defeating query parameter added to online read requests
pub const CACHE_BUSTER_PARAM: &str = "_ts";
