//! Stash Persist - Inventory Persistence
//!
//! This crate stores and retrieves string snapshots of a player's inventory,
//! keyed by a per-user storage key.
//!
//! # Features
//!
//! - Directory-backed local blob store
//! - Base64 transport encoding for remote payloads
//! - Async remote store abstraction
//! - In-memory remote double for tests
//!
//! # Example
//!
//! ```ignore
//! use stash_persist::prelude::*;
//!
//! let store = LocalStore::new("saves");
//! store.save("user42_inventory", &snapshot)?;
//! let restored = store.load("user42_inventory")?;
//! ```

pub mod local;
pub mod remote;
pub mod transport;

pub mod prelude {
    pub use crate::local::{LocalStore, PersistError};
    pub use crate::remote::{MemoryRemote, RemoteStore};
    pub use crate::transport::{decode_payload, encode_payload};
}

pub use prelude::*;
