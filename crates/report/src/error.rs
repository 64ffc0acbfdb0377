//! Error types for report presentation.

use thiserror::Error;

/// An external service refused to take the report.
///
/// Presentation is user-initiated and repeatable, so these are reported and
/// not retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PresentError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("report view unavailable: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, PresentError>;
