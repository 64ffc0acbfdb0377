//! Collector configuration.
//!
//! Loaded from `<config_dir>/version-collector/config.json`. Every field has a
//! default, so a missing file or a partial file is fine.

use crate::error::{CollectorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use vercol_gesture::DEFAULT_SHOW_REPORT_BINDING;
use vercol_ledger::UNKNOWN_VERSION_LABEL;

const APP_DIR: &str = "version-collector";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Window for a second press to count as a double press.
    pub gesture_window_ms: u64,

    /// Upper bound on one process inspection.
    pub extraction_timeout_ms: u64,

    /// How often the standalone host polls the foreground application.
    pub poll_interval_ms: u64,

    /// Text shown where a version could not be determined.
    pub unknown_version_label: String,

    /// Directory of installed extensions, one sub-directory each.
    pub extensions_dir: Option<PathBuf>,

    /// Key binding of the report gesture.
    pub gesture_binding: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            gesture_window_ms: 500,
            extraction_timeout_ms: 250,
            poll_interval_ms: 500,
            unknown_version_label: UNKNOWN_VERSION_LABEL.to_string(),
            extensions_dir: default_extensions_dir(),
            gesture_binding: DEFAULT_SHOW_REPORT_BINDING.to_string(),
        }
    }
}

impl CollectorConfig {
    pub fn gesture_window(&self) -> Duration {
        Duration::from_millis(self.gesture_window_ms)
    }

    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_millis(self.extraction_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.gesture_window_ms == 0 {
            return Err(CollectorError::InvalidConfig(
                "gesture_window_ms must be greater than zero".into(),
            ));
        }
        if self.extraction_timeout_ms == 0 {
            return Err(CollectorError::InvalidConfig(
                "extraction_timeout_ms must be greater than zero".into(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(CollectorError::InvalidConfig(
                "poll_interval_ms must be greater than zero".into(),
            ));
        }
        if self.gesture_binding.trim().is_empty() {
            return Err(CollectorError::InvalidConfig(
                "gesture_binding must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| CollectorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&content).map_err(|source| CollectorError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;

        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from the default location.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}

/// `<config_dir>/version-collector/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join(APP_DIR).join(CONFIG_FILE))
}

fn default_extensions_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join(APP_DIR).join("extensions"))
}
