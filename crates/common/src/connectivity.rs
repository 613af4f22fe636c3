//! Connectivity monitor
//!
//! Tracks online/offline transitions driven by environment-level network
//! events and exposes the current state to subscribers. On entering offline
//! the monitor records a durable "was offline" flag (its own storage key,
//! independent of the session record) so that the next transition back to
//! online can be distinguished from "always was online": that transition
//! emits a one-shot [`Notice::BackOnline`] which auto-dismisses after a fixed
//! 3-second window. No polling anywhere; the expiry is a single delayed task,
//! aborted if a new offline transition arrives first.

use std::sync::Arc;
use std::time::Duration;

use clubportal_domain::constants::{
    BACK_ONLINE_NOTICE_SECS, OFFLINE_FLAG_KEY, OFFLINE_FLAG_VALUE,
};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::notify::{Notice, Notifier};
use crate::storage::KeyValueStore;

/// Two-valued connectivity signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityState {
    /// The environment reports network access.
    Online,
    /// The environment reports no network access.
    Offline,
}

impl ConnectivityState {
    /// Whether this state is [`ConnectivityState::Online`].
    #[must_use]
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// Capability trait for querying current connectivity
///
/// The request and response interceptors consult this on every call; the
/// production implementation is [`ConnectivityMonitor`], tests inject a
/// static fake.
pub trait ConnectivityProbe: Send + Sync {
    /// Current connectivity state as last observed.
    fn is_online(&self) -> bool;
}

/// Event-driven online/offline state machine
///
/// Feed environment signals in through [`handle_online`] and
/// [`handle_offline`]; duplicate signals are ignored. Must live inside a
/// tokio runtime because the banner expiry is a spawned delayed task.
///
/// [`handle_online`]: ConnectivityMonitor::handle_online
/// [`handle_offline`]: ConnectivityMonitor::handle_offline
pub struct ConnectivityMonitor {
    flags: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    state_tx: watch::Sender<ConnectivityState>,
    banner_expiry: Mutex<Option<JoinHandle<()>>>,
}

impl ConnectivityMonitor {
    /// Create a monitor starting in `initial` state.
    ///
    /// A leftover "was offline" flag found while starting online is stale
    /// (e.g. the previous session died offline and connectivity came back
    /// before this one started); it is cleared without emitting so initial
    /// load never shows a spurious banner.
    pub fn new(
        initial: ConnectivityState,
        flags: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        if initial.is_online() {
            match flags.get(OFFLINE_FLAG_KEY) {
                Ok(Some(_)) => {
                    debug!("clearing stale offline flag from a previous session");
                    if let Err(error) = flags.remove(OFFLINE_FLAG_KEY) {
                        warn!(%error, "failed to clear stale offline flag");
                    }
                }
                Ok(None) => {}
                Err(error) => warn!(%error, "failed to read offline flag at startup"),
            }
        }

        let (state_tx, _) = watch::channel(initial);
        Self { flags, notifier, state_tx, banner_expiry: Mutex::new(None) }
    }

    /// Current connectivity state.
    pub fn state(&self) -> ConnectivityState {
        *self.state_tx.borrow()
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ConnectivityState> {
        self.state_tx.subscribe()
    }

    /// Environment signal: network lost.
    ///
    /// Records the durable flag, cancels a pending banner expiry and drops
    /// the banner if it is currently showing.
    pub fn handle_offline(&self) {
        if self.state() == ConnectivityState::Offline {
            debug!("duplicate offline signal ignored");
            return;
        }

        if let Err(error) = self.flags.set(OFFLINE_FLAG_KEY, OFFLINE_FLAG_VALUE) {
            warn!(%error, "failed to record offline flag");
        }

        if let Some(task) = self.banner_expiry.lock().take() {
            task.abort();
            self.notifier.dismiss(Notice::BackOnline);
        }

        debug!("connectivity lost");
        self.state_tx.send_replace(ConnectivityState::Offline);
    }

    /// Environment signal: network available.
    ///
    /// On a genuine offline→online transition with the durable flag set,
    /// emits one [`Notice::BackOnline`], clears the flag and schedules the
    /// 3-second auto-dismiss.
    pub fn handle_online(&self) {
        if self.state() == ConnectivityState::Online {
            debug!("duplicate online signal ignored");
            return;
        }

        debug!("connectivity restored");
        self.state_tx.send_replace(ConnectivityState::Online);

        let was_offline = match self.flags.get(OFFLINE_FLAG_KEY) {
            Ok(flag) => flag.is_some(),
            Err(error) => {
                warn!(%error, "failed to read offline flag");
                false
            }
        };
        if !was_offline {
            return;
        }

        if let Err(error) = self.flags.remove(OFFLINE_FLAG_KEY) {
            warn!(%error, "failed to clear offline flag");
        }

        self.notifier.show(Notice::BackOnline);

        let notifier = Arc::clone(&self.notifier);
        let expiry = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(BACK_ONLINE_NOTICE_SECS)).await;
            notifier.dismiss(Notice::BackOnline);
        });
        *self.banner_expiry.lock() = Some(expiry);
    }
}

impl ConnectivityProbe for ConnectivityMonitor {
    fn is_online(&self) -> bool {
        self.state().is_online()
    }
}
