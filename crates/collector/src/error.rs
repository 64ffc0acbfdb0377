use std::path::PathBuf;
use vercol_ledger::LedgerError;

#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(String),

    #[error("Extension registry unavailable: {0}")]
    Registry(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type Result<T> = std::result::Result<T, CollectorError>;
