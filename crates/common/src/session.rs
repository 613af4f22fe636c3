//! Session store
//!
//! Owns the persisted authentication token record. The record lives under a
//! single well-known storage key as a serialized envelope
//! (`{ "state": { "token": "..." } }`), written by the login flow, read on
//! every outgoing request and deleted on logout or a 401 response.

use std::sync::Arc;

use clubportal_domain::constants::SESSION_STORAGE_KEY;
use clubportal_domain::SessionEnvelope;
use tracing::debug;

use crate::storage::{KeyValueStore, StorageError};

/// Reader/eraser for the persisted session envelope
///
/// The core never writes the envelope; the login flow persists it directly
/// through the same backing store (see `backing`).
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Create a session store over the given backing store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the persisted token.
    ///
    /// Fail-open: an absent key, a storage fault or a malformed envelope all
    /// read as "no session" rather than an error, so a broken record can
    /// never block outgoing requests.
    pub fn read(&self) -> Option<String> {
        match self.store.get(SESSION_STORAGE_KEY) {
            Ok(Some(raw)) => {
                let token = SessionEnvelope::parse(&raw);
                if token.is_none() {
                    debug!("stored session envelope is malformed; treating as unauthenticated");
                }
                token
            }
            Ok(None) => None,
            Err(error) => {
                debug!(%error, "session storage read failed; treating as unauthenticated");
                None
            }
        }
    }

    /// Remove the persisted envelope entirely.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(SESSION_STORAGE_KEY)
    }

    /// Backing store handle, used by the login flow to write the envelope.
    pub fn backing(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }
}
