//! Remote store abstraction

use crate::local::PersistError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// An asynchronous keyed blob store on the far side of a transport
///
/// Payloads cross this trait already transport-encoded (see
/// [`crate::transport`]); implementations move opaque strings and nothing
/// else. Upload and download run to completion or fail; there is no
/// cancellation.
pub trait RemoteStore {
    /// Upload a payload under a key, replacing any previous payload
    fn upload(
        &self,
        key: &str,
        payload: &str,
    ) -> impl std::future::Future<Output = Result<(), PersistError>> + Send;

    /// Download the payload stored under a key
    fn download(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<String, PersistError>> + Send;
}

/// In-memory remote store
///
/// Stands in for a real server in tests and offline builds. The failure
/// toggle makes every call fail, for exercising fallback paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryRemote {
    blobs: Arc<RwLock<HashMap<String, String>>>,
    failing: Arc<RwLock<bool>>,
}

impl MemoryRemote {
    /// Create an empty remote
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        *self.failing.write() = failing;
    }

    /// Number of stored payloads
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    /// Check if the remote holds no payloads
    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }

    fn check_up(&self) -> Result<(), PersistError> {
        if *self.failing.read() {
            return Err(PersistError::Remote("remote unavailable".to_string()));
        }
        Ok(())
    }
}

impl RemoteStore for MemoryRemote {
    async fn upload(&self, key: &str, payload: &str) -> Result<(), PersistError> {
        self.check_up()?;
        self.blobs
            .write()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }

    async fn download(&self, key: &str) -> Result<String, PersistError> {
        self.check_up()?;
        self.blobs
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| PersistError::NotFound(key.to_string()))
    }
}
