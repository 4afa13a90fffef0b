//! Document store

use crate::node::Node;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved field holding the store-assigned node identity
pub const ID_FIELD: &str = "id";

/// Document errors
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Snapshot could not be parsed
    #[error("parse error: {0}")]
    Parse(String),
    /// Snapshot could not be produced
    #[error("serialize error: {0}")]
    Serialize(String),
}

/// A hierarchical keyed document
///
/// Top-level entries are direct children of an unnamed root node. Every node
/// created through [`Document::create_node`] is stamped with a store-assigned
/// `"id"` field; that field is owned by the store and is never meaningful to
/// callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    root: Node,
    next_id: i64,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            root: Node::new(""),
            next_id: 1,
        }
    }

    /// Find the first node with the given name (depth-first)
    pub fn find_first(&self, name: &str) -> Option<&Node> {
        self.root.find_first(name)
    }

    /// Find the first node with the given name, mutably
    pub fn find_first_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.root.find_first_mut(name)
    }

    /// Create a top-level node and stamp its internal identity
    pub fn create_node(&mut self, name: impl Into<String>) -> &mut Node {
        let id = self.next_id;
        self.next_id += 1;

        let node = self.root.push_child(Node::new(name));
        node.set_field(ID_FIELD, FieldValue::Int(id));
        node
    }

    /// Remove the first top-level node with the given name
    pub fn remove_first(&mut self, name: &str) -> bool {
        self.root.remove_first_child(name).is_some()
    }

    /// Top-level nodes
    pub fn nodes(&self) -> &[Node] {
        self.root.children()
    }

    /// Number of top-level nodes
    pub fn len(&self) -> usize {
        self.root.children().len()
    }

    /// Check if the document has no nodes
    pub fn is_empty(&self) -> bool {
        self.root.children().is_empty()
    }

    /// Produce a string snapshot of the whole document
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        serde_json::to_string(self).map_err(|e| DocumentError::Serialize(e.to_string()))
    }

    /// Reconstruct a document from a string snapshot
    pub fn from_json_string(snapshot: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(snapshot).map_err(|e| DocumentError::Parse(e.to_string()))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
