//! Stash Session - Session-Scoped Inventory
//!
//! This crate ties an inventory ledger to a logged-in user: it loads the
//! ledger on login, saves it under the user's storage key, and syncs it
//! against a remote store with local fallback.
//!
//! # Features
//!
//! - One session object per active user, owning the ledger
//! - Login-triggered load, explicit save
//! - Wholesale ledger replacement
//! - Remote push/pull, falling back to the local copy on failure
//! - Shared ledger handle for concurrent adapters
//!
//! # Example
//!
//! ```ignore
//! use stash_session::prelude::*;
//!
//! let store = LocalStore::new("saves");
//! let mut session = PlayerSession::login("user42", store)?;
//! session.ledger_mut().add_items("sword", 1, None)?;
//! session.save()?;
//! ```

pub mod handle;
pub mod session;

pub mod prelude {
    pub use crate::handle::SharedLedger;
    pub use crate::session::{PlayerSession, SyncError, SyncSource};
    pub use stash_ledger::prelude::*;
    pub use stash_persist::prelude::*;
}

pub use prelude::*;
