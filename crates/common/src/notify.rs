//! User-visible notices
//!
//! The access layer emits exactly two kinds of transient notices: the
//! "back online" banner driven by the connectivity monitor and the generic
//! "server error" toast for 5xx responses received while online. The UI layer
//! implements [`Notifier`]; tests use the recording fake from
//! [`crate::testing`].

/// A transient user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Connectivity returned after a recorded offline period.
    BackOnline,
    /// The server answered with the given 5xx status while online.
    ServerError {
        /// HTTP status code of the failed response.
        status: u16,
    },
}

/// Capability trait for showing and dismissing notices
pub trait Notifier: Send + Sync {
    /// Display a notice.
    fn show(&self, notice: Notice);

    /// Remove a previously shown notice. Dismissing a notice that is not
    /// currently shown is a no-op.
    fn dismiss(&self, notice: Notice);
}
