//! Navigation capability
//!
//! The response interceptor forces a redirect to the login route when an
//! admin-scoped page receives a 401. Navigation is environment-specific
//! (browser history, desktop webview), so it sits behind a small injected
//! trait like the other environment couplings.

/// Capability trait for inspecting and changing the current route
pub trait Navigator: Send + Sync {
    /// Path of the route currently displayed (e.g. `/admin/events`).
    fn current_path(&self) -> String;

    /// Replace the current route with `path`.
    fn replace(&self, path: &str);
}
