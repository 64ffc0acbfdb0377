//! Shared event contracts between the host and the collector.
//!
//! This crate defines the events the host delivers (focus changes, gesture
//! presses) and the events the collector emits back (announcements and
//! ledger notifications). Using shared types keeps producers and consumers
//! agreeing on field names.
//!
//! Also provides the `EventBus` trait for decoupled event emission.

mod bus;

pub use bus::{emit_event, EmittedEvent, EventBus, EventBusRef, InMemoryEventBus, NullEventBus};

use serde::{Deserialize, Serialize};
use vercol_context::ActiveTarget;

/// Event delivered when the user's active application changes.
///
/// Producers: host (or the standalone focus poller)
/// Consumers: collection trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusChangedEvent {
    /// Handle to the newly active application.
    pub target: ActiveTarget,
    /// Timestamp in milliseconds since epoch.
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl FocusChangedEvent {
    pub fn now(target: ActiveTarget) -> Self {
        Self {
            target,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Event delivered when the user presses a bound gesture.
///
/// Producers: host
/// Consumers: gesture disambiguator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GesturePressedEvent {
    /// Identifier of the bound gesture (e.g., "show_report").
    pub gesture_id: String,
    /// Timestamp in milliseconds since epoch.
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl GesturePressedEvent {
    pub fn now(gesture_id: impl Into<String>) -> Self {
        Self {
            gesture_id: gesture_id.into(),
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Everything the host can deliver, in delivery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    FocusChanged(FocusChangedEvent),
    GesturePressed(GesturePressedEvent),
}

/// Payload of a user-facing announcement.
///
/// Producers: report presenter
/// Consumers: host speech/braille output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiMessageEvent {
    /// Text to announce.
    pub text: String,
    /// Whether the message reports a failure.
    #[serde(default)]
    pub is_error: bool,
}

/// Event names as constants to prevent typos.
pub mod event_names {
    /// Brief, non-blocking announcement to the user.
    pub const UI_MESSAGE: &str = "ui:message";
    /// A record was written to the ledger.
    pub const RECORD_UPSERTED: &str = "ledger:record_upserted";
    /// The extension inventory was loaded.
    pub const EXTENSIONS_LOADED: &str = "ledger:extensions_loaded";
    /// The report document was handed to the browsing surface.
    pub const REPORT_SHOWN: &str = "report:shown";
    /// The text report was written to the clipboard.
    pub const REPORT_COPIED: &str = "report:copied";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_event_tagging() {
        let event = HostEvent::FocusChanged(FocusChangedEvent {
            target: ActiveTarget::from_pid(42),
            timestamp_ms: 1000,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "focus_changed");
        assert_eq!(json["target"]["pid"], 42);
    }

    #[test]
    fn test_gesture_pressed_deserialize_minimal() {
        let json = r#"{"type": "gesture_pressed", "gesture_id": "show_report"}"#;
        let event: HostEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            HostEvent::GesturePressed(GesturePressedEvent {
                gesture_id: "show_report".into(),
                timestamp_ms: 0,
            })
        );
    }

    #[test]
    fn test_ui_message_deserialize_minimal() {
        let json = r#"{"text": "copied"}"#;
        let event: UiMessageEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.text, "copied");
        assert!(!event.is_error);
    }
}
