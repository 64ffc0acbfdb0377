//! One collection session: ledger, trigger, gesture, and presenter wired up.

use crate::config::CollectorConfig;
use crate::dispatcher::HostEventHandler;
use crate::error::Result;
use crate::extensions::ExtensionRegistry;
use crate::trigger::CollectionTrigger;
use std::sync::Arc;
use tokio::runtime::Handle;
use vercol_context::{IdentityExtractor, ProcessInspector};
use vercol_events::{event_names, EventBusRef, HostEvent};
use vercol_gesture::{GestureAction, GestureBinding, GestureCallback, GestureDisambiguator};
use vercol_ledger::{CollectionId, VersionLedger};
use vercol_report::{BrowsingSurface, ClipboardService, ReportFormatter, ReportPresenter};

/// External collaborators a session needs.
pub struct CollectorDeps {
    pub inspector: Arc<dyn ProcessInspector>,
    pub registry: Arc<dyn ExtensionRegistry>,
    pub clipboard: Arc<dyn ClipboardService>,
    pub surface: Arc<dyn BrowsingSurface>,
    pub event_bus: EventBusRef,
}

/// The running collector.
///
/// Owns the ledger for the lifetime of the session. Host events go through
/// [`VersionCollector::handle`], usually via a
/// [`HostDispatcher`](crate::HostDispatcher).
pub struct VersionCollector {
    ledger: Arc<VersionLedger>,
    trigger: CollectionTrigger,
    gestures: GestureDisambiguator,
    presenter: Arc<ReportPresenter>,
    binding: GestureBinding,
}

impl VersionCollector {
    /// Build the session and load the extension inventory.
    ///
    /// `runtime` hosts the gesture timer; presses may arrive on any thread.
    /// An unavailable registry is logged and leaves the extension table empty.
    pub fn start(config: &CollectorConfig, deps: CollectorDeps, runtime: Handle) -> Result<Self> {
        config.validate()?;

        let ledger = Arc::new(VersionLedger::new());

        let extensions = match deps.registry.list_installed_extensions() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "extension registry unavailable");
                Vec::new()
            }
        };
        ledger.extensions_loaded(extensions)?;
        let extension_count = ledger.len(CollectionId::Extensions);
        deps.event_bus.emit(
            event_names::EXTENSIONS_LOADED,
            serde_json::json!({ "count": extension_count }),
        );

        let trigger = CollectionTrigger::new(
            Arc::clone(&ledger),
            IdentityExtractor::with_timeout(deps.inspector, config.extraction_timeout()),
            Arc::clone(&deps.event_bus),
        );

        let presenter = Arc::new(ReportPresenter::new(
            Arc::clone(&ledger),
            ReportFormatter::new(config.unknown_version_label.clone()),
            deps.clipboard,
            deps.surface,
            deps.event_bus,
        ));

        let gestures = GestureDisambiguator::with_handle(
            runtime,
            config.gesture_window(),
            gesture_callback(Arc::clone(&presenter)),
        );

        let binding = GestureBinding::show_report().with_binding(config.gesture_binding.clone());

        tracing::info!(
            extensions = extension_count,
            binding = %binding.binding,
            window = ?config.gesture_window(),
            "version collector started"
        );

        Ok(Self {
            ledger,
            trigger,
            gestures,
            presenter,
            binding,
        })
    }

    pub fn ledger(&self) -> &Arc<VersionLedger> {
        &self.ledger
    }

    pub fn presenter(&self) -> &ReportPresenter {
        &self.presenter
    }

    /// The gesture as the host should list it.
    pub fn binding(&self) -> &GestureBinding {
        &self.binding
    }

    /// Handle one host event.
    pub fn handle(&self, event: &HostEvent) {
        match event {
            HostEvent::FocusChanged(focus) => {
                self.trigger.on_focus_changed(focus);
            }
            HostEvent::GesturePressed(press) => {
                if self.binding.matches(&press.gesture_id) {
                    self.gestures.press();
                } else {
                    tracing::debug!(gesture = %press.gesture_id, "ignoring unbound gesture");
                }
            }
        }
    }

    /// End the session. A pending "open report" is dropped.
    pub fn shutdown(self) {
        self.gestures.cancel_pending();
        tracing::info!(
            applications = self.ledger.len(CollectionId::Applications),
            extensions = self.ledger.len(CollectionId::Extensions),
            "version collector stopped"
        );
    }
}

impl HostEventHandler for VersionCollector {
    fn handle(&self, event: &HostEvent) {
        VersionCollector::handle(self, event);
    }
}

fn gesture_callback(presenter: Arc<ReportPresenter>) -> GestureCallback {
    Arc::new(move |action| {
        // Failures were already announced and logged by the presenter.
        let result = match action {
            GestureAction::OpenReport => presenter.show_report(),
            GestureAction::CopyToClipboard => presenter.copy_to_clipboard(),
        };
        if let Err(e) = result {
            tracing::debug!(?action, error = %e, "gesture action failed");
        }
    })
}
