//! Shared ledger handle

use parking_lot::RwLock;
use stash_ledger::InventoryLedger;
use std::sync::Arc;

/// A ledger behind a single lock, for adapters that need access from more
/// than one thread
///
/// Every ledger operation is a read-then-write against the same backing
/// field, so interleaving is never safe; one lock serializes all mutation.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<InventoryLedger>>,
}

impl SharedLedger {
    /// Wrap a ledger
    pub fn new(ledger: InventoryLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Run a read-only closure against the ledger
    pub fn read<T>(&self, f: impl FnOnce(&InventoryLedger) -> T) -> T {
        f(&self.inner.read())
    }

    /// Run a mutating closure against the ledger
    pub fn write<T>(&self, f: impl FnOnce(&mut InventoryLedger) -> T) -> T {
        f(&mut self.inner.write())
    }

    /// Replace the whole ledger (wholesale swap, atomic with respect to
    /// other holders of this handle)
    pub fn replace(&self, ledger: InventoryLedger) {
        self.inner.write().replace(ledger);
    }
}
