//! Document nodes

use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named node with scalar fields and child nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node name (not required to be unique within the document)
    pub name: String,
    /// Scalar fields, keyed by case-sensitive field name
    fields: HashMap<String, FieldValue>,
    /// Child nodes
    children: Vec<Node>,
}

impl Node {
    /// Create a new node with no fields or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Get a raw field value
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Set a raw field value
    pub fn set_field(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Remove a field, returning its previous value
    pub fn remove_field(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Check if a field exists
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get a string field (None if unset or not a string)
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name)?.as_str()
    }

    /// Set a string field
    pub fn set_str(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), FieldValue::Str(value.into()));
    }

    /// Get an integer field (0 if unset or outside integer range)
    pub fn get_i32(&self, name: &str) -> i32 {
        i32::try_from(self.get_i64(name)).unwrap_or(0)
    }

    /// Set an integer field
    pub fn set_i32(&mut self, name: impl Into<String>, value: i32) {
        self.fields.insert(name.into(), FieldValue::Int(value as i64));
    }

    /// Get a long field (0 if unset)
    pub fn get_i64(&self, name: &str) -> i64 {
        self.fields
            .get(name)
            .and_then(FieldValue::as_int)
            .unwrap_or(0)
    }

    /// Set a long field
    pub fn set_i64(&mut self, name: impl Into<String>, value: i64) {
        self.fields.insert(name.into(), FieldValue::Int(value));
    }

    /// Iterate over fields
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields on this node
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Append a child node, returning a mutable reference to it
    pub fn push_child(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        self.children.last_mut().unwrap()
    }

    /// Child nodes
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Find the first descendant with the given name (depth-first, children
    /// before siblings)
    pub fn find_first(&self, name: &str) -> Option<&Node> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find_first(name) {
                return Some(found);
            }
        }
        None
    }

    /// Find the first descendant with the given name, mutably
    pub fn find_first_mut(&mut self, name: &str) -> Option<&mut Node> {
        for child in &mut self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find_first_mut(name) {
                return Some(found);
            }
        }
        None
    }

    /// Remove the first direct child with the given name
    pub fn remove_first_child(&mut self, name: &str) -> Option<Node> {
        let idx = self.children.iter().position(|c| c.name == name)?;
        Some(self.children.remove(idx))
    }
}
