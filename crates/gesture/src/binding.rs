//! Descriptor of the report gesture as shown in the host's configuration UI.

use serde::{Deserialize, Serialize};

/// Identifier of the report gesture.
pub const SHOW_REPORT_GESTURE_ID: &str = "show_report";

/// Default key binding for the report gesture.
pub const DEFAULT_SHOW_REPORT_BINDING: &str = "kb:NVDA+control+shift+v";

/// Category the gesture is listed under.
pub const TOOLS_CATEGORY: &str = "Tools";

/// A rebindable input gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureBinding {
    pub id: String,
    /// Current key binding; user-configurable.
    pub binding: String,
    pub category: String,
    pub description: String,
}

impl GestureBinding {
    /// The report gesture with its default binding.
    pub fn show_report() -> Self {
        Self {
            id: SHOW_REPORT_GESTURE_ID.to_string(),
            binding: DEFAULT_SHOW_REPORT_BINDING.to_string(),
            category: TOOLS_CATEGORY.to_string(),
            description: "View the Version Collector report. \
                          Press twice to copy a text version to the clipboard."
                .to_string(),
        }
    }

    pub fn with_binding(mut self, binding: impl Into<String>) -> Self {
        self.binding = binding.into();
        self
    }

    pub fn matches(&self, gesture_id: &str) -> bool {
        self.id == gesture_id
    }
}

impl Default for GestureBinding {
    fn default() -> Self {
        Self::show_report()
    }
}
