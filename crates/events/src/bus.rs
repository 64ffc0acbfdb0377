//! Outbound event channel.
//!
//! The collector announces results (copied reports, ledger changes) through
//! [`EventBus`] and never learns who listens: the host's speech output, a
//! console, or a test recorder.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Sink for collector events.
///
/// Implementations must not block: emission happens on the event delivery
/// path or on the gesture timer.
pub trait EventBus: Send + Sync {
    /// Emit `payload` under `topic` (see [`event_names`](crate::event_names)).
    fn emit(&self, topic: &str, payload: serde_json::Value);
}

/// Shared event bus handle.
pub type EventBusRef = Arc<dyn EventBus>;

/// Serialize `payload` and emit it. Payloads that fail to serialize are dropped.
pub fn emit_event<T: serde::Serialize>(bus: &dyn EventBus, topic: &str, payload: &T) {
    match serde_json::to_value(payload) {
        Ok(value) => bus.emit(topic, value),
        Err(e) => tracing::warn!(topic, error = %e, "dropping unserializable event"),
    }
}

/// One event captured by [`InMemoryEventBus`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedEvent {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// Records every emitted event, in order. Meant for tests.
#[derive(Default)]
pub struct InMemoryEventBus {
    log: Mutex<Vec<EmittedEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<EmittedEvent>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything captured so far.
    pub fn events(&self) -> Vec<EmittedEvent> {
        self.log().clone()
    }

    pub fn events_for(&self, topic: &str) -> Vec<EmittedEvent> {
        self.log()
            .iter()
            .filter(|e| e.topic == topic)
            .cloned()
            .collect()
    }

    /// Payloads emitted under `topic`, oldest first.
    pub fn payloads_for(&self, topic: &str) -> Vec<serde_json::Value> {
        self.log()
            .iter()
            .filter(|e| e.topic == topic)
            .map(|e| e.payload.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.log().clear();
    }

    pub fn len(&self) -> usize {
        self.log().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log().is_empty()
    }
}

impl EventBus for InMemoryEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        self.log().push(EmittedEvent {
            topic: topic.to_string(),
            payload,
        });
    }
}

/// Discards everything.
pub struct NullEventBus;

impl EventBus for NullEventBus {
    fn emit(&self, _topic: &str, _payload: serde_json::Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event_names, UiMessageEvent};
    use serde_json::json;

    #[test]
    fn test_capture_keeps_order_per_topic() {
        let bus = InMemoryEventBus::new();

        bus.emit(event_names::UI_MESSAGE, json!({"text": "one"}));
        bus.emit(event_names::REPORT_COPIED, json!({"bytes": 3}));
        bus.emit(event_names::UI_MESSAGE, json!({"text": "two"}));

        assert_eq!(bus.len(), 3);
        assert_eq!(bus.events_for(event_names::REPORT_COPIED).len(), 1);
        assert!(bus.events_for(event_names::REPORT_SHOWN).is_empty());
        assert_eq!(
            bus.payloads_for(event_names::UI_MESSAGE),
            vec![json!({"text": "one"}), json!({"text": "two"})]
        );
    }

    #[test]
    fn test_clear() {
        let bus = InMemoryEventBus::new();
        bus.emit(event_names::RECORD_UPSERTED, json!({}));
        assert!(!bus.is_empty());

        bus.clear();
        assert!(bus.is_empty());
    }

    #[test]
    fn test_emit_event_serializes_payload() {
        let bus = InMemoryEventBus::new();
        emit_event(
            &bus,
            event_names::UI_MESSAGE,
            &UiMessageEvent {
                text: "Application version report copied.".into(),
                is_error: false,
            },
        );

        assert_eq!(
            bus.events(),
            vec![EmittedEvent {
                topic: event_names::UI_MESSAGE.to_string(),
                payload: json!({"text": "Application version report copied.", "is_error": false}),
            }]
        );
    }

    #[test]
    fn test_null_bus_accepts_anything() {
        NullEventBus.emit(event_names::UI_MESSAGE, json!({"text": "ignored"}));
    }
}
