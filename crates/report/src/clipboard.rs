//! Clipboard adapter.
//!
//! Implements ClipboardService using arboard for cross-platform clipboard access.

use crate::error::{PresentError, Result};
use crate::presenter::ClipboardService;

/// ClipboardService implementation using arboard.
///
/// A fresh `arboard::Clipboard` is opened per write; holding one open for the
/// session keeps an X11 selection owner alive on Linux.
pub struct ArboardClipboard;

impl ArboardClipboard {
    /// Create a new platform clipboard service.
    pub fn new() -> Self {
        Self
    }
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardService for ArboardClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| PresentError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| PresentError::Clipboard(e.to_string()))
    }
}
