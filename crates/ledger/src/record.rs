//! Version records and their component types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when a version could not be determined.
pub const UNKNOWN_VERSION_LABEL: &str = "unknown";

/// A version string, or the sentinel for "could not be determined".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Version {
    Known(String),
    Unknown,
}

impl Version {
    /// Build a version from raw inspection output.
    ///
    /// Missing or blank strings become [`Version::Unknown`].
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if !v.is_empty() => Version::Known(v.to_string()),
            _ => Version::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Version::Known(_))
    }

    pub fn as_known(&self) -> Option<&str> {
        match self {
            Version::Known(v) => Some(v),
            Version::Unknown => None,
        }
    }

    /// Render with a caller-chosen sentinel label.
    pub fn display_with<'a>(&'a self, unknown_label: &'a str) -> &'a str {
        self.as_known().unwrap_or(unknown_label)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_with(UNKNOWN_VERSION_LABEL))
    }
}

impl From<&str> for Version {
    fn from(raw: &str) -> Self {
        Version::from_raw(Some(raw))
    }
}

/// Process architecture, when the inspection layer reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bitness {
    Bits32,
    Bits64,
}

impl Bitness {
    pub fn from_is_64bit(is_64bit: bool) -> Self {
        if is_64bit {
            Bitness::Bits64
        } else {
            Bitness::Bits32
        }
    }
}

impl fmt::Display for Bitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bitness::Bits32 => f.write_str("32 bit"),
            Bitness::Bits64 => f.write_str("64 bit"),
        }
    }
}

/// One observed piece of software, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Canonical software identity (e.g., "Notepad (Microsoft Windows Operating System)")
    pub name: String,

    /// Version string, or the sentinel when unavailable
    pub version: Version,

    /// Architecture, when known
    #[serde(default)]
    pub bitness: Option<Bitness>,
}

impl VersionRecord {
    pub fn new(name: impl Into<String>, version: impl Into<Version>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            bitness: None,
        }
    }

    pub fn with_bitness(mut self, bitness: Option<Bitness>) -> Self {
        self.bitness = bitness;
        self
    }
}

/// A record as stored in the ledger, with observation timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub record: VersionRecord,

    /// Unix milliseconds of the first observation; never changes
    pub first_seen_ms: i64,

    /// Unix milliseconds of the latest observation
    pub last_seen_ms: i64,
}

impl LedgerEntry {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn version(&self) -> &Version {
        &self.record.version
    }
}
