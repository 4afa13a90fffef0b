//! Stash Ledger - Per-Player Inventory
//!
//! This crate provides the inventory ledger: a mapping from item names to
//! quantities plus arbitrary keyed meta fields per item, with mutation rules
//! that never leave the ledger inconsistent.
//!
//! # Features
//!
//! - Quantity add/remove with a strict no-negative policy
//! - Items removed entirely when their quantity reaches zero
//! - Meta field arithmetic with optional clamp-to-zero
//! - Query predicates treating absent items as quantity zero
//! - String snapshot round trip via the document store
//!
//! # Example
//!
//! ```ignore
//! use stash_ledger::prelude::*;
//!
//! let mut ledger = InventoryLedger::new();
//! ledger.add_items("sword", 3, None)?;
//! ledger.meta_math_add("sword", "ATT", 10);
//!
//! assert_eq!(ledger.remove_items("sword", 3), RemoveOutcome::Success);
//! assert!(ledger.has_exactly("sword", 0));
//! ```

pub mod ledger;
pub mod meta;

pub mod prelude {
    pub use crate::ledger::{InventoryLedger, LedgerError, RemoveOutcome};
    pub use crate::meta::{meta_fields, MetaFields};
    pub use stash_document::FieldValue;
}

pub use prelude::*;
