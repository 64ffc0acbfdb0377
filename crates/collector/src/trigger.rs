//! Focus-driven collection.

use std::sync::Arc;
use vercol_context::IdentityExtractor;
use vercol_events::{event_names, EventBusRef, FocusChangedEvent};
use vercol_ledger::{CollectionId, UpsertOutcome, VersionLedger};

/// Records the identity of every newly focused application.
///
/// Stateless between events: each focus change is one best-effort attempt.
/// Failures are logged and dropped; the next focus change brings fresh data.
pub struct CollectionTrigger {
    ledger: Arc<VersionLedger>,
    extractor: IdentityExtractor,
    event_bus: EventBusRef,
}

impl CollectionTrigger {
    pub fn new(
        ledger: Arc<VersionLedger>,
        extractor: IdentityExtractor,
        event_bus: EventBusRef,
    ) -> Self {
        Self {
            ledger,
            extractor,
            event_bus,
        }
    }

    /// Handle one focus change. Returns what happened to the ledger, if anything.
    pub fn on_focus_changed(&self, event: &FocusChangedEvent) -> Option<UpsertOutcome> {
        let record = match self.extractor.extract(&event.target) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(active = %event.target, error = %e, "dropping focus event");
                return None;
            }
        };

        match self.ledger.upsert(CollectionId::Applications, record.clone()) {
            Ok(outcome) => {
                if outcome != UpsertOutcome::Refreshed {
                    tracing::info!(
                        name = %record.name,
                        version = %record.version,
                        ?outcome,
                        "application recorded"
                    );
                }
                self.event_bus.emit(
                    event_names::RECORD_UPSERTED,
                    serde_json::json!({
                        "collection": CollectionId::Applications,
                        "record": record,
                        "outcome": outcome,
                    }),
                );
                Some(outcome)
            }
            Err(e) => {
                tracing::warn!(name = %record.name, error = %e, "ledger rejected record");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use vercol_context::{ActiveTarget, ProcessInspector};
    use vercol_events::InMemoryEventBus;
    use vercol_ledger::Version;

    /// Inspector answering from a pid → (exe, version) table.
    #[derive(Default)]
    struct TableInspector {
        apps: Mutex<HashMap<u32, (Option<String>, Option<String>)>>,
    }

    impl TableInspector {
        fn set(&self, pid: u32, exe: Option<&str>, version: Option<&str>) {
            self.apps
                .lock()
                .unwrap()
                .insert(pid, (exe.map(String::from), version.map(String::from)));
        }
    }

    impl ProcessInspector for TableInspector {
        fn executable_name(&self, target: &ActiveTarget) -> Option<String> {
            self.apps.lock().unwrap().get(&target.pid)?.0.clone()
        }

        fn product_name(&self, _target: &ActiveTarget) -> Option<String> {
            None
        }

        fn version_info(&self, target: &ActiveTarget) -> Option<String> {
            self.apps.lock().unwrap().get(&target.pid)?.1.clone()
        }

        fn is_64bit(&self, _target: &ActiveTarget) -> Option<bool> {
            None
        }
    }

    fn setup() -> (CollectionTrigger, Arc<VersionLedger>, Arc<TableInspector>, Arc<InMemoryEventBus>) {
        let ledger = Arc::new(VersionLedger::new());
        let inspector = Arc::new(TableInspector::default());
        let bus = Arc::new(InMemoryEventBus::new());
        let trigger = CollectionTrigger::new(
            Arc::clone(&ledger),
            IdentityExtractor::new(inspector.clone()),
            bus.clone(),
        );
        (trigger, ledger, inspector, bus)
    }

    fn focus(pid: u32) -> FocusChangedEvent {
        FocusChangedEvent::now(ActiveTarget::from_pid(pid))
    }

    #[test]
    fn test_records_focused_application() {
        let (trigger, ledger, inspector, bus) = setup();
        inspector.set(10, Some("notepad"), Some("10.0"));

        assert_eq!(trigger.on_focus_changed(&focus(10)), Some(UpsertOutcome::Inserted));

        let entry = ledger.get(CollectionId::Applications, "Notepad").unwrap();
        assert_eq!(entry.version(), &Version::from("10.0"));

        let events = bus.payloads_for(event_names::RECORD_UPSERTED);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["record"]["name"], "Notepad");
        assert_eq!(events[0]["outcome"], "inserted");
    }

    #[test]
    fn test_missing_version_stored_as_sentinel() {
        let (trigger, ledger, inspector, _bus) = setup();
        inspector.set(11, Some("calc"), None);

        trigger.on_focus_changed(&focus(11));

        let entry = ledger.get(CollectionId::Applications, "Calc").unwrap();
        assert_eq!(entry.version(), &Version::Unknown);
    }

    #[test]
    fn test_unnamed_target_leaves_ledger_unchanged() {
        let (trigger, ledger, inspector, bus) = setup();
        inspector.set(10, Some("notepad"), Some("10.0"));
        inspector.set(12, None, Some("1.0"));
        trigger.on_focus_changed(&focus(10));
        let before = ledger.snapshot_all();

        assert_eq!(trigger.on_focus_changed(&focus(12)), None);
        assert_eq!(trigger.on_focus_changed(&focus(0)), None);
        assert_eq!(trigger.on_focus_changed(&focus(999)), None);

        assert_eq!(ledger.snapshot_all(), before);
        assert_eq!(bus.events_for(event_names::RECORD_UPSERTED).len(), 1);
    }

    #[test]
    fn test_version_update_keeps_position() {
        let (trigger, ledger, inspector, _bus) = setup();
        inspector.set(1, Some("notepad"), Some("10.0"));
        inspector.set(2, Some("calculator"), Some("11.0"));

        trigger.on_focus_changed(&focus(1));
        trigger.on_focus_changed(&focus(2));
        inspector.set(1, Some("notepad"), Some("10.1"));
        assert_eq!(trigger.on_focus_changed(&focus(1)), Some(UpsertOutcome::Updated));

        let apps = ledger.snapshot(CollectionId::Applications);
        let names: Vec<&str> = apps.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Notepad", "Calculator"]);
        assert_eq!(apps[0].version(), &Version::from("10.1"));
    }
}
