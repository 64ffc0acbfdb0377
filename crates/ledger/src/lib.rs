//! In-memory ledger of software versions seen during a session.
//!
//! The ledger holds two independent, insertion-ordered collections keyed by
//! canonical software name:
//! - `applications`: filled continuously as the active application changes
//! - `extensions`: filled once at startup from the installed extension inventory
//!
//! Later observations of a name overwrite its record in place. Nothing is
//! persisted; a new process starts from an empty ledger.
//!
//! # Example
//!
//! ```
//! use vercol_ledger::{CollectionId, VersionLedger, VersionRecord};
//!
//! let ledger = VersionLedger::new();
//! ledger.upsert(CollectionId::Applications, VersionRecord::new("Notepad", "10.0")).unwrap();
//! ledger.upsert(CollectionId::Applications, VersionRecord::new("Notepad", "10.1")).unwrap();
//!
//! let apps = ledger.snapshot(CollectionId::Applications);
//! assert_eq!(apps.len(), 1);
//! assert_eq!(apps[0].version().to_string(), "10.1");
//! ```

mod error;
mod ledger;
mod record;

pub use error::LedgerError;
pub use ledger::{CollectionId, LedgerSnapshot, UpsertOutcome, VersionLedger};
pub use record::{Bitness, LedgerEntry, Version, VersionRecord, UNKNOWN_VERSION_LABEL};
