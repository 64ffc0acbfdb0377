//! The shared version ledger.

use crate::error::LedgerError;
use crate::record::{LedgerEntry, VersionRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Which of the two independent collections to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionId {
    /// Applications observed through focus changes
    Applications,
    /// Installed extensions, loaded once at startup
    Extensions,
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionId::Applications => f.write_str("applications"),
            CollectionId::Extensions => f.write_str("extensions"),
        }
    }
}

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// New name, appended at the end
    Inserted,
    /// Existing name, version or bitness overwritten in place
    Updated,
    /// Existing name with an identical record; only `last_seen_ms` moved
    Refreshed,
}

/// Point-in-time copy of both collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub applications: Vec<LedgerEntry>,
    pub extensions: Vec<LedgerEntry>,
}

impl LedgerSnapshot {
    pub fn collection(&self, id: CollectionId) -> &[LedgerEntry] {
        match id {
            CollectionId::Applications => &self.applications,
            CollectionId::Extensions => &self.extensions,
        }
    }
}

/// Ordered name → entry map. Positions never move once assigned.
#[derive(Debug, Default)]
struct Collection {
    entries: Vec<LedgerEntry>,
    index: HashMap<String, usize>,
}

impl Collection {
    fn upsert(&mut self, record: VersionRecord, now_ms: i64) -> UpsertOutcome {
        if let Some(&pos) = self.index.get(&record.name) {
            let entry = &mut self.entries[pos];
            entry.last_seen_ms = now_ms;
            if entry.record == record {
                return UpsertOutcome::Refreshed;
            }
            entry.record = record;
            return UpsertOutcome::Updated;
        }

        self.index.insert(record.name.clone(), self.entries.len());
        self.entries.push(LedgerEntry {
            record,
            first_seen_ms: now_ms,
            last_seen_ms: now_ms,
        });
        UpsertOutcome::Inserted
    }

    fn get(&self, name: &str) -> Option<&LedgerEntry> {
        self.index.get(name).map(|&pos| &self.entries[pos])
    }
}

#[derive(Debug, Default)]
struct LedgerInner {
    applications: Collection,
    extensions: Collection,
    extensions_loaded: bool,
}

impl LedgerInner {
    fn collection(&self, id: CollectionId) -> &Collection {
        match id {
            CollectionId::Applications => &self.applications,
            CollectionId::Extensions => &self.extensions,
        }
    }

    fn collection_mut(&mut self, id: CollectionId) -> &mut Collection {
        match id {
            CollectionId::Applications => &mut self.applications,
            CollectionId::Extensions => &mut self.extensions,
        }
    }
}

/// Deduplicated, insertion-ordered store of observed software versions.
///
/// Writers take an exclusive lock; readers copy under the shared lock, so a
/// snapshot never observes a partially applied write. Every mutation keeps the
/// invariants at each step, which makes it safe to recover a poisoned lock.
#[derive(Debug, Default)]
pub struct VersionLedger {
    inner: RwLock<LedgerInner>,
}

impl VersionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, LedgerInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or overwrite `record` by name, stamped with the current time.
    pub fn upsert(
        &self,
        collection: CollectionId,
        record: VersionRecord,
    ) -> Result<UpsertOutcome, LedgerError> {
        self.upsert_at(collection, record, chrono::Utc::now().timestamp_millis())
    }

    /// Insert or overwrite `record` by name with an explicit timestamp.
    ///
    /// An overwrite keeps the entry's original position and `first_seen_ms`.
    pub fn upsert_at(
        &self,
        collection: CollectionId,
        record: VersionRecord,
        now_ms: i64,
    ) -> Result<UpsertOutcome, LedgerError> {
        if record.name.trim().is_empty() {
            return Err(LedgerError::EmptyName);
        }

        let outcome = self.write().collection_mut(collection).upsert(record, now_ms);
        tracing::trace!(%collection, ?outcome, "ledger upsert");
        Ok(outcome)
    }

    /// Replace the extension collection with the startup inventory.
    ///
    /// Accepted once per ledger. Duplicate names in `records` collapse to one
    /// entry at the first position carrying the last record. Records with
    /// empty names are skipped.
    pub fn extensions_loaded(&self, records: Vec<VersionRecord>) -> Result<(), LedgerError> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let mut fresh = Collection::default();
        for record in records {
            if record.name.trim().is_empty() {
                tracing::warn!("skipping extension with empty name");
                continue;
            }
            fresh.upsert(record, now_ms);
        }

        let mut inner = self.write();
        if inner.extensions_loaded {
            return Err(LedgerError::ExtensionsAlreadyLoaded);
        }
        let count = fresh.entries.len();
        inner.extensions = fresh;
        inner.extensions_loaded = true;
        drop(inner);

        tracing::debug!(count, "extensions loaded");
        Ok(())
    }

    /// Owned copy of one collection in insertion order.
    pub fn snapshot(&self, collection: CollectionId) -> Vec<LedgerEntry> {
        self.read().collection(collection).entries.clone()
    }

    /// Owned copy of both collections taken under a single read lock.
    pub fn snapshot_all(&self) -> LedgerSnapshot {
        let inner = self.read();
        LedgerSnapshot {
            applications: inner.applications.entries.clone(),
            extensions: inner.extensions.entries.clone(),
        }
    }

    pub fn get(&self, collection: CollectionId, name: &str) -> Option<LedgerEntry> {
        self.read().collection(collection).get(name).cloned()
    }

    pub fn len(&self, collection: CollectionId) -> usize {
        self.read().collection(collection).entries.len()
    }

    pub fn is_empty(&self, collection: CollectionId) -> bool {
        self.len(collection) == 0
    }

    pub fn has_extensions_loaded(&self) -> bool {
        self.read().extensions_loaded
    }
}
