use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// A JSON file that mirrors an in-memory collection.
///
/// Loads are strict: a missing file yields `None`, while an unreadable
/// or malformed file is an error. Saves rewrite the whole file in place,
/// pretty-printed.
#[derive(Debug, Clone)]
pub struct FileMirror {
    path: PathBuf,
}

impl FileMirror {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file, or `None` if it does not exist yet.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::ReadFile {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let value = serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        Ok(Some(value))
    }

    /// Serialize `value` and overwrite the file with it.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::WriteFile {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        // serde_json only fails here on non-string map keys or a Serialize
        // impl that errors; neither applies to the store documents.
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, json).map_err(|source| StoreError::WriteFile {
            path: self.path.clone(),
            source,
        })
    }
}
