//! Example: offline-tolerant reads and the connectivity banner
//!
//! Builds a client against an unreachable backend and shows how reads
//! degrade to the offline fallback instead of failing, then walks the
//! connectivity monitor through an outage and recovery.
//!
//! Run with: `cargo run -p clubportal-infra --example offline_demo`

use std::sync::Arc;

use clubportal_common::testing::{RecordingNavigator, RecordingNotifier, StaticProbe};
use clubportal_common::{ConnectivityMonitor, ConnectivityState, MemoryStore};
use clubportal_infra::api::announcements;
use clubportal_infra::{ApiClient, ApiConfig, CallResult};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("ClubPortal offline degradation demo");
    println!("===================================\n");

    let storage = Arc::new(MemoryStore::new());
    let probe = Arc::new(StaticProbe::new(false));
    let notifier = Arc::new(RecordingNotifier::new());

    // Nothing listens here; every call fails at the transport layer.
    let client = ApiClient::builder()
        .config(ApiConfig { base_url: "http://127.0.0.1:9".to_string(), ..ApiConfig::default() })
        .storage(storage.clone())
        .probe(probe.clone())
        .navigator(Arc::new(RecordingNavigator::new("/announcements")))
        .notifier(notifier.clone())
        .build()?;

    println!("Fetching announcements while offline...");
    match announcements::list(&client).await? {
        CallResult::Success(items) => println!("✗ unexpected success: {} items", items.len()),
        CallResult::OfflineFallback => {
            println!("✓ call resolved to the offline fallback, no error surfaced\n");
        }
    }

    println!("Walking the connectivity monitor through an outage:");
    let monitor =
        ConnectivityMonitor::new(ConnectivityState::Online, storage.clone(), notifier.clone());
    monitor.handle_offline();
    println!("  network lost     -> state: {:?}", monitor.state());
    monitor.handle_online();
    println!("  network restored -> state: {:?}", monitor.state());
    println!("  notices so far: {:?}", notifier.events());

    println!("\nThe banner auto-dismisses three seconds after recovery:");
    tokio::time::sleep(std::time::Duration::from_secs(4)).await;
    println!("  notices now:    {:?}", notifier.events());

    Ok(())
}
