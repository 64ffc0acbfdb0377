//! Error types for ledger mutation.

use thiserror::Error;

/// Errors returned by [`crate::VersionLedger`] writes.
///
/// A failed write never changes the ledger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Records must carry a non-empty canonical name.
    #[error("record name is empty")]
    EmptyName,

    /// The extension inventory is a once-per-session snapshot.
    #[error("extensions were already loaded for this session")]
    ExtensionsAlreadyLoaded,
}
