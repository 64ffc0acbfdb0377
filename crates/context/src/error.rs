//! Error types for identity extraction.

use std::time::Duration;
use thiserror::Error;

/// Reasons an active target could not be turned into a record.
///
/// None of these reach the user; the observation is simply dropped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// The host handed over a handle without a process.
    #[error("active target has no process")]
    InvalidHandle,

    /// Neither an executable name nor a product name could be read.
    #[error("no usable name for pid {pid}")]
    NameUnavailable { pid: u32 },

    /// The inspection layer did not answer in time.
    #[error("inspection timed out after {0:?}")]
    TimedOut(Duration),

    /// The inspector panicked while answering.
    #[error("inspector panicked")]
    InspectorPanicked,

    /// An earlier inspection is still running; this one was not attempted.
    #[error("previous inspection still in flight")]
    Busy,

    /// The inspection worker thread is not running.
    #[error("inspection worker unavailable: {0}")]
    WorkerUnavailable(String),
}
