//! Application error types.

use std::path::PathBuf;

use thiserror::Error;

/// Application-level errors for finrings.
///
/// These only arise at the edges (CLI arguments, config, catalog and replay
/// files). The interaction core works on ids minted by the catalog and has no
/// failure modes of its own.
#[derive(Error, Debug)]
pub enum AppError {
    // Lookup errors
    #[error("Unknown layer: {0}")]
    UnknownLayer(String),

    #[error("Unknown sub-item: {0}")]
    UnknownSubItem(String),

    // Content errors
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid replay script: {0}")]
    InvalidScript(String),

    // IO / serialization errors
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOON serialization error: {0}")]
    Toon(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// Wrap an IO error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}
