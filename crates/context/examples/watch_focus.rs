//! Example: Watch the foreground application and print its identity.
//!
//! Run with: cargo run -p vercol-context --example watch_focus

use std::sync::Arc;
use std::time::Duration;
use vercol_context::{platform, FocusPoller, IdentityExtractor};

fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter("vercol_context=debug")
        .init();

    println!("=== Focus Watch Example ===");
    println!("Switch between apps to see their names and versions.\n");

    let extractor = IdentityExtractor::new(Arc::new(platform::PlatformInspector::new()));
    let mut poller = FocusPoller::new();

    poller.start(
        Arc::new(platform::PlatformFocusProvider::new()),
        Arc::new(move |target| match extractor.extract(&target) {
            Ok(record) => println!("{}: {}", record.name, record.version),
            Err(e) => println!("({target}: {e})"),
        }),
    );

    println!("Running for 30 seconds... (Ctrl+C to stop)\n");
    std::thread::sleep(Duration::from_secs(30));

    poller.stop();
    println!("\nDone.");
}
