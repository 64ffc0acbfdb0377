mod console;

use anyhow::Context;
use console::{ConsoleEventBus, TerminalSurface};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vercol_collector::{
    CollectorConfig, CollectorDeps, HostDispatcher, ManifestDirRegistry, StaticRegistry,
    VersionCollector,
};
use vercol_context::platform::{PlatformFocusProvider, PlatformInspector};
use vercol_context::{FocusCallback, FocusPoller};
use vercol_events::{FocusChangedEvent, GesturePressedEvent, HostEvent};
use vercol_gesture::SHOW_REPORT_GESTURE_ID;
use vercol_report::ArboardClipboard;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,vercol=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => CollectorConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => CollectorConfig::load_default().context("loading default config")?,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("vercol-timer")
        .enable_time()
        .build()
        .context("building tokio runtime")?;

    let registry: Arc<dyn vercol_collector::ExtensionRegistry> = match &config.extensions_dir {
        Some(dir) => Arc::new(ManifestDirRegistry::new(dir)),
        None => Arc::new(StaticRegistry::default()),
    };

    let collector = Arc::new(VersionCollector::start(
        &config,
        CollectorDeps {
            inspector: Arc::new(PlatformInspector::new()),
            registry,
            clipboard: Arc::new(ArboardClipboard::new()),
            surface: Arc::new(TerminalSurface),
            event_bus: Arc::new(ConsoleEventBus),
        },
        runtime.handle().clone(),
    )?);

    let dispatcher = HostDispatcher::start(collector.clone())?;

    let submitter = dispatcher.submitter();
    let on_focus: FocusCallback = Arc::new(move |target| {
        submitter.submit(HostEvent::FocusChanged(FocusChangedEvent::now(target)));
    });
    let mut poller = FocusPoller::new();
    poller.start_with_interval(
        Arc::new(PlatformFocusProvider::new()),
        on_focus,
        config.poll_interval(),
    );

    println!(
        "Watching focus. Press Enter for the report ({}), twice quickly to copy it. Type q to quit.",
        collector.binding().binding
    );

    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }
        dispatcher.submit(HostEvent::GesturePressed(GesturePressedEvent::now(
            SHOW_REPORT_GESTURE_ID,
        )));
    }

    poller.stop();
    drop(poller);
    dispatcher.shutdown();
    match Arc::try_unwrap(collector) {
        Ok(collector) => collector.shutdown(),
        Err(_) => tracing::warn!("collector still shared at exit"),
    }
    runtime.shutdown_background();

    Ok(())
}
