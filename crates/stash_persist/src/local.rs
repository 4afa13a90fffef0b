//! Local blob store

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Persistence errors
#[derive(Debug, Error)]
pub enum PersistError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// No blob saved under the given key
    #[error("no saved blob for key: {0}")]
    NotFound(String),
    /// Transport payload could not be decoded
    #[error("transport decode error: {0}")]
    Transport(String),
    /// Snapshot could not be produced or parsed
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
    /// Remote store failure
    #[error("remote error: {0}")]
    Remote(String),
}

/// Directory-backed store for string snapshots
///
/// Each blob is a single file named `<key>.json` under the store directory.
/// The store has no opinion on the blob's content; callers own the format.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The store directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ensure the store directory exists
    pub fn ensure_dir(&self) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Save a snapshot under a key, overwriting any previous blob
    pub fn save(&self, key: &str, payload: &str) -> Result<(), PersistError> {
        self.ensure_dir()?;
        fs::write(self.blob_path(key), payload)?;
        log::debug!("Saved blob '{}' ({} bytes)", key, payload.len());
        Ok(())
    }

    /// Load the snapshot saved under a key
    pub fn load(&self, key: &str) -> Result<String, PersistError> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Err(PersistError::NotFound(key.to_string()));
        }
        Ok(fs::read_to_string(path)?)
    }

    /// Check if a blob exists for a key
    pub fn exists(&self, key: &str) -> bool {
        self.blob_path(key).exists()
    }

    /// Delete the blob for a key, if any
    pub fn delete(&self, key: &str) -> Result<(), PersistError> {
        let path = self.blob_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// List the keys of all saved blobs
    pub fn list_keys(&self) -> Result<Vec<String>, PersistError> {
        self.ensure_dir()?;

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
