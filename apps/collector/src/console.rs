//! Terminal stand-ins for the host's browsing surface and speech output.

use std::io::Write;
use vercol_events::{event_names, EventBus, UiMessageEvent};
use vercol_report::{BrowsingSurface, PresentError, ReportDocument};

/// Prints the report as plain text on stdout.
pub struct TerminalSurface;

impl BrowsingSurface for TerminalSurface {
    fn present(&self, document: &ReportDocument) -> vercol_report::Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "\n{}", document.to_plain_text())
            .and_then(|_| out.flush())
            .map_err(|e| PresentError::Surface(e.to_string()))
    }
}

/// Prints announcements; everything else goes to the trace log.
pub struct ConsoleEventBus;

impl EventBus for ConsoleEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        if topic != event_names::UI_MESSAGE {
            tracing::trace!(topic, %payload, "event");
            return;
        }
        match serde_json::from_value::<UiMessageEvent>(payload) {
            Ok(message) if message.is_error => eprintln!("! {}", message.text),
            Ok(message) => println!("> {}", message.text),
            Err(e) => tracing::warn!(error = %e, "malformed ui message"),
        }
    }
}
