//! Stash Document - Hierarchical Keyed Store
//!
//! This crate provides the document store that backs the inventory ledger.
//!
//! # Features
//!
//! - Named nodes with scalar fields (string, integer, long)
//! - First-match lookup by node name
//! - Reserved internal node identity ("id" field)
//! - String snapshot serialization (JSON)
//!
//! # Example
//!
//! ```ignore
//! use stash_document::prelude::*;
//!
//! let mut doc = Document::new();
//! let node = doc.create_node("sword");
//! node.set_i64("value", 3);
//!
//! let snapshot = doc.to_json_string()?;
//! let restored = Document::from_json_string(&snapshot)?;
//! ```

pub mod document;
pub mod node;
pub mod value;

pub mod prelude {
    pub use crate::document::{Document, DocumentError};
    pub use crate::node::Node;
    pub use crate::value::FieldValue;
}

pub use prelude::*;
