use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the catalog and favorites stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("book with id {0} not found")]
    NotFound(i64),

    #[error("book with isbn '{0}' not found")]
    IsbnNotFound(String),

    #[error("failed to read store file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write store file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed store file {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// True for lookup misses, false for persistence failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::IsbnNotFound(_))
    }
}
