//! Modular common utilities shared across ClubPortal crates.
//!
//! This crate holds the environment capability traits and the two stateful
//! components the resilient API access layer depends on:
//!
//! - [`storage`]: key-value storage capability and implementations
//! - [`session`]: the persisted session envelope owner
//! - [`connectivity`]: the online/offline monitor and probe trait
//! - [`notify`]: transient user-visible notices
//! - [`navigation`]: the route capability used for 401 redirects
//! - [`testing`]: recording fakes for all of the above

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod connectivity;
pub mod navigation;
pub mod notify;
pub mod session;
pub mod storage;
pub mod testing;

// Re-export commonly used items
pub use connectivity::{ConnectivityMonitor, ConnectivityProbe, ConnectivityState};
pub use navigation::Navigator;
pub use notify::{Notice, Notifier};
pub use session::SessionStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
