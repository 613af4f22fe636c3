//! Testing utilities and fakes
//!
//! In-memory implementations of the environment capability traits
//! ([`ConnectivityProbe`], [`Navigator`], [`Notifier`]) for unit and
//! integration tests. Production code wires the real environment facilities
//! instead.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::connectivity::ConnectivityProbe;
use crate::navigation::Navigator;
use crate::notify::{Notice, Notifier};

/// Connectivity probe with a manually controlled answer
#[derive(Debug)]
pub struct StaticProbe {
    online: AtomicBool,
}

impl StaticProbe {
    /// Create a probe reporting the given state.
    pub fn new(online: bool) -> Self {
        Self { online: AtomicBool::new(online) }
    }

    /// Flip the reported state.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl ConnectivityProbe for StaticProbe {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

/// Navigator fake that records every replacement
#[derive(Debug)]
pub struct RecordingNavigator {
    path: Mutex<String>,
    replacements: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Create a navigator currently showing `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: Mutex::new(path.into()), replacements: Mutex::new(Vec::new()) }
    }

    /// Routes navigated to, in order.
    pub fn replacements(&self) -> Vec<String> {
        self.replacements.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.lock().clone()
    }

    fn replace(&self, path: &str) {
        *self.path.lock() = path.to_string();
        self.replacements.lock().push(path.to_string());
    }
}

/// A recorded notifier interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeEvent {
    /// `show` was called with the notice.
    Shown(Notice),
    /// `dismiss` was called with the notice.
    Dismissed(Notice),
}

/// Notifier fake that records shows and dismissals
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<NoticeEvent>>,
}

impl RecordingNotifier {
    /// Create an empty recording notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded interactions, in order.
    pub fn events(&self) -> Vec<NoticeEvent> {
        self.events.lock().clone()
    }

    /// Number of times `notice` was shown.
    pub fn shown_count(&self, notice: Notice) -> usize {
        self.events.lock().iter().filter(|e| **e == NoticeEvent::Shown(notice)).count()
    }

    /// Number of times `notice` was dismissed.
    pub fn dismissed_count(&self, notice: Notice) -> usize {
        self.events.lock().iter().filter(|e| **e == NoticeEvent::Dismissed(notice)).count()
    }

    /// Number of server-error notices shown, regardless of status.
    pub fn server_error_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, NoticeEvent::Shown(Notice::ServerError { .. })))
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, notice: Notice) {
        self.events.lock().push(NoticeEvent::Shown(notice));
    }

    fn dismiss(&self, notice: Notice) {
        self.events.lock().push(NoticeEvent::Dismissed(notice));
    }
}
