//! Hands formatted reports to the outside world.

use crate::document::ReportDocument;
use crate::error::Result;
use crate::format::ReportFormatter;
use std::sync::Arc;
use vercol_events::{emit_event, event_names, EventBusRef, UiMessageEvent};
use vercol_ledger::VersionLedger;

/// Message announced after a successful clipboard export.
pub const COPIED_MESSAGE: &str = "Application version report copied.";

/// Plain-text clipboard.
pub trait ClipboardService: Send + Sync {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// Read-only document viewer.
///
/// Implementations must let the user select and copy text, and dismiss the
/// view with escape. Dismissal never touches the ledger.
pub trait BrowsingSurface: Send + Sync {
    fn present(&self, document: &ReportDocument) -> Result<()>;
}

/// Entry points behind the report gesture.
pub struct ReportPresenter {
    ledger: Arc<VersionLedger>,
    formatter: ReportFormatter,
    clipboard: Arc<dyn ClipboardService>,
    surface: Arc<dyn BrowsingSurface>,
    event_bus: EventBusRef,
}

impl ReportPresenter {
    pub fn new(
        ledger: Arc<VersionLedger>,
        formatter: ReportFormatter,
        clipboard: Arc<dyn ClipboardService>,
        surface: Arc<dyn BrowsingSurface>,
        event_bus: EventBusRef,
    ) -> Self {
        Self {
            ledger,
            formatter,
            clipboard,
            surface,
            event_bus,
        }
    }

    pub fn formatter(&self) -> &ReportFormatter {
        &self.formatter
    }

    /// Build the table document and open it on the browsing surface.
    pub fn show_report(&self) -> Result<()> {
        let snapshot = self.ledger.snapshot_all();
        let document = self.formatter.format_table(&snapshot);

        match self.surface.present(&document) {
            Ok(()) => {
                tracing::debug!(
                    applications = snapshot.applications.len(),
                    extensions = snapshot.extensions.len(),
                    "report shown"
                );
                self.event_bus.emit(
                    event_names::REPORT_SHOWN,
                    serde_json::json!({
                        "applications": snapshot.applications.len(),
                        "extensions": snapshot.extensions.len(),
                    }),
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to show report");
                self.announce("Could not open the version report.", true);
                Err(e)
            }
        }
    }

    /// Copy the text report to the clipboard and confirm briefly.
    ///
    /// Never opens the browsing surface.
    pub fn copy_to_clipboard(&self) -> Result<()> {
        let text = self.formatter.format_text(&self.ledger.snapshot_all());

        match self.clipboard.set_text(&text) {
            Ok(()) => {
                tracing::debug!(bytes = text.len(), "report copied");
                self.event_bus.emit(
                    event_names::REPORT_COPIED,
                    serde_json::json!({ "bytes": text.len() }),
                );
                self.announce(COPIED_MESSAGE, false);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to copy report");
                self.announce("Could not copy the version report.", true);
                Err(e)
            }
        }
    }

    fn announce(&self, text: &str, is_error: bool) {
        emit_event(
            self.event_bus.as_ref(),
            event_names::UI_MESSAGE,
            &UiMessageEvent {
                text: text.to_string(),
                is_error,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PresentError;
    use std::sync::Mutex;
    use vercol_events::InMemoryEventBus;
    use vercol_ledger::{CollectionId, VersionRecord};

    #[derive(Default)]
    struct RecordingClipboard {
        texts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl ClipboardService for RecordingClipboard {
        fn set_text(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(PresentError::Clipboard("locked".into()));
            }
            self.texts.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        documents: Mutex<Vec<ReportDocument>>,
        fail: bool,
    }

    impl BrowsingSurface for RecordingSurface {
        fn present(&self, document: &ReportDocument) -> Result<()> {
            if self.fail {
                return Err(PresentError::Surface("no display".into()));
            }
            self.documents.lock().unwrap().push(document.clone());
            Ok(())
        }
    }

    struct Fixture {
        presenter: ReportPresenter,
        ledger: Arc<VersionLedger>,
        clipboard: Arc<RecordingClipboard>,
        surface: Arc<RecordingSurface>,
        bus: Arc<InMemoryEventBus>,
    }

    fn fixture(clipboard: RecordingClipboard, surface: RecordingSurface) -> Fixture {
        let ledger = Arc::new(VersionLedger::new());
        ledger
            .upsert(CollectionId::Applications, VersionRecord::new("Notepad", "10.1"))
            .unwrap();
        let clipboard = Arc::new(clipboard);
        let surface = Arc::new(surface);
        let bus = Arc::new(InMemoryEventBus::new());
        let presenter = ReportPresenter::new(
            Arc::clone(&ledger),
            ReportFormatter::default(),
            clipboard.clone(),
            surface.clone(),
            bus.clone(),
        );
        Fixture {
            presenter,
            ledger,
            clipboard,
            surface,
            bus,
        }
    }

    #[test]
    fn test_copy_writes_text_and_announces() {
        let f = fixture(RecordingClipboard::default(), RecordingSurface::default());

        f.presenter.copy_to_clipboard().unwrap();

        let texts = f.clipboard.texts.lock().unwrap();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].starts_with("Applications:\nNotepad: 10.1\n"));
        assert!(f.surface.documents.lock().unwrap().is_empty());

        let messages = f.bus.payloads_for(event_names::UI_MESSAGE);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["text"], COPIED_MESSAGE);
        assert_eq!(messages[0]["is_error"], false);
    }

    #[test]
    fn test_show_hands_document_to_surface() {
        let f = fixture(RecordingClipboard::default(), RecordingSurface::default());

        f.presenter.show_report().unwrap();

        let documents = f.surface.documents.lock().unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].sections[0].rows[0][0], "Notepad");
        assert!(f.clipboard.texts.lock().unwrap().is_empty());
        assert_eq!(f.bus.events_for(event_names::REPORT_SHOWN).len(), 1);
    }

    #[test]
    fn test_clipboard_failure_is_announced_not_retried() {
        let f = fixture(
            RecordingClipboard {
                fail: true,
                ..Default::default()
            },
            RecordingSurface::default(),
        );

        let result = f.presenter.copy_to_clipboard();
        assert_eq!(result, Err(PresentError::Clipboard("locked".into())));

        let messages = f.bus.payloads_for(event_names::UI_MESSAGE);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["is_error"], true);
        assert!(f.bus.events_for(event_names::REPORT_COPIED).is_empty());
    }

    #[test]
    fn test_surface_failure_leaves_ledger_alone() {
        let f = fixture(
            RecordingClipboard::default(),
            RecordingSurface {
                fail: true,
                ..Default::default()
            },
        );
        let before = f.ledger.snapshot_all();

        assert!(f.presenter.show_report().is_err());
        assert_eq!(f.ledger.snapshot_all(), before);
        assert_eq!(f.bus.payloads_for(event_names::UI_MESSAGE)[0]["is_error"], true);
    }
}
