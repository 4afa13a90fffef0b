//! Player sessions

use stash_ledger::InventoryLedger;
use stash_persist::{decode_payload, encode_payload, LocalStore, PersistError, RemoteStore};
use thiserror::Error;

/// Sync errors
#[derive(Debug, Error)]
pub enum SyncError {
    /// Upload failed; carries the raw payload that was sent so the caller
    /// can retry or spool it
    #[error("upload failed: {source}")]
    Upload {
        source: PersistError,
        payload: String,
    },
    /// The local snapshot could not be produced or stored
    #[error("snapshot failed: {0}")]
    Snapshot(String),
}

/// Where the ledger contents came from after a pull
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncSource {
    /// Downloaded from the remote store
    Remote,
    /// Remote unavailable or unreadable; loaded the local copy instead
    Local,
}

/// A logged-in user's inventory session
///
/// Owns the ledger for the lifetime of the session; all mutation goes
/// through [`Self::ledger_mut`]. Replacing the ledger (fresh load, failed
/// fetch, new login) is a wholesale swap, never a merge.
#[derive(Debug)]
pub struct PlayerSession {
    user_id: String,
    ledger: InventoryLedger,
    store: LocalStore,
}

impl PlayerSession {
    /// Start a session for a user, loading their saved inventory
    ///
    /// A user with no saved blob starts with an empty ledger; a corrupt blob
    /// is an error rather than a silent wipe.
    pub fn login(user_id: impl Into<String>, store: LocalStore) -> Result<Self, PersistError> {
        let user_id = user_id.into();
        let key = InventoryLedger::storage_key(&user_id);

        let ledger = match store.load(&key) {
            Ok(snapshot) => InventoryLedger::from_snapshot(&snapshot)
                .map_err(|e| PersistError::Corrupt(e.to_string()))?,
            Err(PersistError::NotFound(_)) => InventoryLedger::new(),
            Err(e) => return Err(e),
        };

        log::info!("Session started for '{}' ({} items)", user_id, ledger.len());

        Ok(Self {
            user_id,
            ledger,
            store,
        })
    }

    /// The logged-in user id
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The session's persistence key
    pub fn storage_key(&self) -> String {
        InventoryLedger::storage_key(&self.user_id)
    }

    /// The session's ledger
    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    /// The session's ledger, mutably
    pub fn ledger_mut(&mut self) -> &mut InventoryLedger {
        &mut self.ledger
    }

    /// Save the ledger under the session's storage key
    pub fn save(&self) -> Result<(), PersistError> {
        let snapshot = self
            .ledger
            .to_snapshot()
            .map_err(|e| PersistError::Corrupt(e.to_string()))?;
        self.store.save(&self.storage_key(), &snapshot)?;
        log::info!("Saved inventory for '{}'", self.user_id);
        Ok(())
    }

    /// Replace the whole ledger (wholesale swap, not a merge)
    pub fn replace_ledger(&mut self, ledger: InventoryLedger) {
        self.ledger.replace(ledger);
    }

    /// Push the current ledger to a remote store
    ///
    /// On failure the error carries the exact payload that was sent.
    pub async fn push_remote<R: RemoteStore>(&self, remote: &R) -> Result<(), SyncError> {
        let snapshot = self
            .ledger
            .to_snapshot()
            .map_err(|e| SyncError::Snapshot(e.to_string()))?;
        let payload = encode_payload(&snapshot);

        match remote.upload(&self.storage_key(), &payload).await {
            Ok(()) => {
                log::info!("Pushed inventory for '{}'", self.user_id);
                Ok(())
            }
            Err(source) => {
                log::warn!("Push failed for '{}': {}", self.user_id, source);
                Err(SyncError::Upload { source, payload })
            }
        }
    }

    /// Pull the ledger from a remote store, falling back to the local copy
    ///
    /// A successful download replaces the ledger wholesale. A failed
    /// download, or a payload that does not decode or parse, falls back to
    /// whatever is saved locally; a missing local blob yields an empty
    /// ledger, as on a fresh login.
    pub async fn pull_remote<R: RemoteStore>(
        &mut self,
        remote: &R,
    ) -> Result<SyncSource, PersistError> {
        let key = self.storage_key();

        match self.fetch_remote(remote, &key).await {
            Ok(ledger) => {
                self.replace_ledger(ledger);
                log::info!("Pulled inventory for '{}'", self.user_id);
                Ok(SyncSource::Remote)
            }
            Err(e) => {
                log::warn!("Pull failed for '{}', loading local copy: {}", self.user_id, e);
                let ledger = match self.store.load(&key) {
                    Ok(snapshot) => InventoryLedger::from_snapshot(&snapshot)
                        .map_err(|e| PersistError::Corrupt(e.to_string()))?,
                    Err(PersistError::NotFound(_)) => InventoryLedger::new(),
                    Err(e) => return Err(e),
                };
                self.replace_ledger(ledger);
                Ok(SyncSource::Local)
            }
        }
    }

    async fn fetch_remote<R: RemoteStore>(
        &self,
        remote: &R,
        key: &str,
    ) -> Result<InventoryLedger, PersistError> {
        let payload = remote.download(key).await?;
        let snapshot = decode_payload(&payload)?;
        InventoryLedger::from_snapshot(&snapshot)
            .map_err(|e| PersistError::Corrupt(e.to_string()))
    }
}
