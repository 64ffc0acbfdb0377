//! Installed extension inventory.
//!
//! Scans an extensions directory where every sub-directory holds a
//! `manifest.json`, and turns each manifest into a version record.

use crate::error::{CollectorError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use vercol_ledger::{Version, VersionRecord};

const MANIFEST_FILE: &str = "manifest.json";

/// Source of the installed extension list, queried once per session.
pub trait ExtensionRegistry: Send + Sync {
    fn list_installed_extensions(&self) -> Result<Vec<VersionRecord>>;
}

/// Fields read from an extension manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionManifest {
    /// Internal identifier
    pub name: String,

    /// Human-readable name; preferred for display
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub author: Option<String>,
}

impl ExtensionManifest {
    /// Display name is the summary, falling back to the internal name.
    pub fn display_name(&self) -> &str {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.name.trim())
    }

    pub fn to_record(&self) -> VersionRecord {
        VersionRecord::new(
            self.display_name(),
            Version::from_raw(self.version.as_deref()),
        )
    }
}

/// Registry backed by a directory of extension manifests.
#[derive(Debug, Clone)]
pub struct ManifestDirRegistry {
    dir: PathBuf,
}

impl ManifestDirRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExtensionRegistry for ManifestDirRegistry {
    fn list_installed_extensions(&self) -> Result<Vec<VersionRecord>> {
        if !self.dir.exists() {
            debug!(path = %self.dir.display(), "Extensions directory does not exist");
            return Ok(Vec::new());
        }
        if !self.dir.is_dir() {
            return Err(CollectorError::Registry(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|source| CollectorError::Io {
            path: self.dir.clone(),
            source,
        })?;

        // Sort for a stable report order across runs.
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();

        let mut records = Vec::new();
        for dir in dirs {
            let manifest_path = dir.join(MANIFEST_FILE);
            if !manifest_path.is_file() {
                continue;
            }
            match load_manifest(&manifest_path) {
                Ok(manifest) if !manifest.display_name().is_empty() => {
                    debug!(
                        name = %manifest.name,
                        author = manifest.author.as_deref().unwrap_or(""),
                        "Found extension"
                    );
                    records.push(manifest.to_record());
                }
                Ok(_) => {
                    warn!(path = %manifest_path.display(), "Extension manifest has no name");
                }
                Err(e) => {
                    warn!(path = %manifest_path.display(), error = %e, "Failed to load extension manifest");
                }
            }
        }

        info!(count = records.len(), path = %self.dir.display(), "Extensions enumerated");
        Ok(records)
    }
}

fn load_manifest(path: &Path) -> Result<ExtensionManifest> {
    let content = std::fs::read_to_string(path).map_err(|source| CollectorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CollectorError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Registry serving a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    records: Vec<VersionRecord>,
}

impl StaticRegistry {
    pub fn new(records: Vec<VersionRecord>) -> Self {
        Self { records }
    }
}

impl ExtensionRegistry for StaticRegistry {
    fn list_installed_extensions(&self) -> Result<Vec<VersionRecord>> {
        Ok(self.records.clone())
    }
}
