//! The inventory ledger

use crate::meta::{is_identity_key, MetaFields, VALUE_FIELD};
use stash_document::{Document, DocumentError, Node};
use thiserror::Error;

/// Suffix appended to a user id to form the persistence key for their
/// inventory blob
pub const STORAGE_SUFFIX: &str = "_inventory";

/// Ledger errors
///
/// All ledger failures are local and recoverable; a failed operation never
/// leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Quantity argument was zero or negative
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i64),
    /// Quantity addition would overflow
    #[error("quantity overflow on item '{0}'")]
    Overflow(String),
}

/// Result of a remove operation
///
/// Callers need to distinguish "nonsensical input" from "blocked by the
/// no-negative policy" from "applied", so a boolean is not enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Quantity was zero/negative or the item does not exist; nothing changed
    Invalid,
    /// Removing that many would leave a negative quantity; nothing changed
    Rejected,
    /// Quantity updated, item removed entirely if it reached zero
    Success,
}

impl RemoveOutcome {
    /// Check if the removal was applied
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Per-player inventory ledger
///
/// A façade over a single in-memory [`Document`]. Each item is a top-level
/// node; its quantity lives in the reserved `"value"` field and every other
/// field on the node is caller-owned meta. Quantities never go below zero,
/// and an item whose quantity reaches exactly zero is removed from the
/// document entirely.
#[derive(Debug, Clone)]
pub struct InventoryLedger {
    doc: Document,
}

impl InventoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            doc: Document::new(),
        }
    }

    /// Wrap an existing document
    pub fn from_document(doc: Document) -> Self {
        Self { doc }
    }

    /// The backing document
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Add `qty` of an item, creating the item if it does not exist
    ///
    /// Any `"value"` entry in `meta` is stripped before merging, since the
    /// quantity field is owned by the quantity operations; the reserved
    /// identity key is skipped as well. Remaining entries overwrite
    /// same-named fields. Returns the new quantity.
    pub fn add_items(
        &mut self,
        name: &str,
        qty: i64,
        meta: Option<&MetaFields>,
    ) -> Result<i64, LedgerError> {
        if qty <= 0 {
            return Err(LedgerError::InvalidQuantity(qty));
        }

        let current = self.quantity(name);
        let new_value = current
            .checked_add(qty)
            .ok_or_else(|| LedgerError::Overflow(name.to_string()))?;

        let node = self.ensure_item(name);
        node.set_i64(VALUE_FIELD, new_value);

        if let Some(meta) = meta {
            for (key, value) in meta {
                if key == VALUE_FIELD || is_identity_key(key) {
                    continue;
                }
                node.set_field(key.clone(), value.clone());
            }
        }

        Ok(new_value)
    }

    /// Remove `qty` of an item
    ///
    /// An item whose quantity reaches exactly zero is removed from the
    /// document entirely, so a later quantity query treats it as absent.
    pub fn remove_items(&mut self, name: &str, qty: i64) -> RemoveOutcome {
        if qty <= 0 {
            return RemoveOutcome::Invalid;
        }

        let current = match self.item_quantity(name) {
            Some(v) => v,
            None => return RemoveOutcome::Invalid,
        };

        let remaining = match current.checked_sub(qty) {
            Some(v) if v >= 0 => v,
            _ => return RemoveOutcome::Rejected,
        };

        if remaining == 0 {
            self.doc.remove_first(name);
        } else if let Some(node) = self.doc.find_first_mut(name) {
            node.set_i64(VALUE_FIELD, remaining);
        }

        RemoveOutcome::Success
    }

    /// Add `qty` to a meta field, treating an unset field as zero
    ///
    /// Returns the new field value, or `None` (with no mutation) when `qty`
    /// is not positive, the item does not exist, or the addition would
    /// overflow.
    pub fn meta_math_add(&mut self, name: &str, field: &str, qty: i64) -> Option<i64> {
        if qty <= 0 {
            return None;
        }

        let node = self.doc.find_first_mut(name)?;
        let new_value = node.get_i64(field).checked_add(qty)?;
        node.set_i64(field, new_value);

        Some(new_value)
    }

    /// Subtract `qty` from a meta field
    ///
    /// A result below zero is blocked by the no-negative policy: with
    /// `clamp_to_zero` the field is forced to zero and `Some(0)` returned,
    /// otherwise nothing changes and `None` is returned. `None` is also
    /// returned for a non-positive `qty` or a missing item.
    pub fn meta_math_subtract(
        &mut self,
        name: &str,
        field: &str,
        qty: i64,
        clamp_to_zero: bool,
    ) -> Option<i64> {
        if qty <= 0 {
            return None;
        }

        let node = self.doc.find_first_mut(name)?;
        let current = node.get_i64(field);

        match current.checked_sub(qty) {
            Some(v) if v >= 0 => {
                node.set_i64(field, v);
                Some(v)
            }
            _ if clamp_to_zero => {
                node.set_i64(field, 0);
                Some(0)
            }
            _ => None,
        }
    }

    /// Set meta fields on an existing item, creating or overwriting each
    ///
    /// Entries keyed `"id"` (case-insensitively) are always skipped; the
    /// identity field is never caller-settable. Returns false without
    /// mutation if the item does not exist, true otherwise, even for an
    /// empty map.
    pub fn set_meta_fields(&mut self, name: &str, fields: &MetaFields) -> bool {
        match self.doc.find_first_mut(name) {
            Some(node) => {
                for (key, value) in fields {
                    if is_identity_key(key) {
                        continue;
                    }
                    node.set_field(key.clone(), value.clone());
                }
                true
            }
            None => false,
        }
    }

    /// Set a single meta field; same contract as [`Self::set_meta_fields`]
    pub fn set_meta_field(
        &mut self,
        name: &str,
        field: &str,
        value: impl Into<stash_document::FieldValue>,
    ) -> bool {
        let mut fields = MetaFields::new();
        fields.insert(field.to_string(), value.into());
        self.set_meta_fields(name, &fields)
    }

    /// Current quantity of an item, zero when absent
    pub fn quantity(&self, name: &str) -> i64 {
        self.item_quantity(name).unwrap_or(0)
    }

    /// Check if an item exists
    pub fn contains(&self, name: &str) -> bool {
        self.doc.find_first(name).is_some()
    }

    /// True iff the current quantity is strictly greater than `qty`; for an
    /// absent item, true iff `qty` is zero
    ///
    /// Deliberately a "more than" test rather than the "at least" its name
    /// suggests; callers depend on the strict comparison.
    pub fn has_at_least(&self, name: &str, qty: i64) -> bool {
        match self.item_quantity(name) {
            Some(v) => v > qty,
            None => qty == 0,
        }
    }

    /// True iff the current quantity is strictly less than `qty`, or the
    /// item is absent
    pub fn does_not_have(&self, name: &str, qty: i64) -> bool {
        match self.item_quantity(name) {
            Some(v) => v < qty,
            None => true,
        }
    }

    /// True iff the current quantity equals `qty`; for an absent item, true
    /// iff `qty` is zero
    pub fn has_exactly(&self, name: &str, qty: i64) -> bool {
        match self.item_quantity(name) {
            Some(v) => v == qty,
            None => qty == 0,
        }
    }

    /// Read an integer meta field; `None` when the item is absent, zero when
    /// only the field is unset
    pub fn meta_i64(&self, name: &str, field: &str) -> Option<i64> {
        Some(self.doc.find_first(name)?.get_i64(field))
    }

    /// Read a string meta field
    pub fn meta_str(&self, name: &str, field: &str) -> Option<&str> {
        self.doc.find_first(name)?.get_str(field)
    }

    /// Names of all items, in creation order
    pub fn item_names(&self) -> Vec<&str> {
        self.doc.nodes().iter().map(|n| n.name.as_str()).collect()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.doc.len()
    }

    /// Check if the ledger has no items
    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }

    /// Produce a string snapshot of all items and meta fields
    pub fn to_snapshot(&self) -> Result<String, DocumentError> {
        self.doc.to_json_string()
    }

    /// Reconstruct a ledger from a string snapshot
    pub fn from_snapshot(snapshot: &str) -> Result<Self, DocumentError> {
        Ok(Self {
            doc: Document::from_json_string(snapshot)?,
        })
    }

    /// Replace the whole ledger with another (wholesale swap, not a merge)
    pub fn replace(&mut self, other: InventoryLedger) {
        self.doc = other.doc;
    }

    /// Persistence key for a user's inventory blob
    pub fn storage_key(user_id: &str) -> String {
        format!("{}{}", user_id, STORAGE_SUFFIX)
    }

    fn item_quantity(&self, name: &str) -> Option<i64> {
        Some(self.doc.find_first(name)?.get_i64(VALUE_FIELD))
    }

    fn ensure_item(&mut self, name: &str) -> &mut Node {
        if self.doc.find_first(name).is_none() {
            return self.doc.create_node(name);
        }
        // Second lookup keeps the borrow checker happy; the item is known to
        // exist here.
        self.doc.find_first_mut(name).unwrap()
    }
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::meta_fields;
    use stash_document::FieldValue;

    #[test]
    fn test_add_creates_item() {
        let mut ledger = InventoryLedger::new();

        assert_eq!(ledger.add_items("sword", 3, None), Ok(3));
        assert!(ledger.contains("sword"));
        assert_eq!(ledger.quantity("sword"), 3);
    }

    #[test]
    fn test_add_accumulates() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("gold", 10, None).unwrap();
        assert_eq!(ledger.add_items("gold", 5, None), Ok(15));
        assert_eq!(ledger.quantity("gold"), 15);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_add_rejects_non_positive_qty() {
        let mut ledger = InventoryLedger::new();

        assert_eq!(
            ledger.add_items("gold", 0, None),
            Err(LedgerError::InvalidQuantity(0))
        );
        assert_eq!(
            ledger.add_items("gold", -1, None),
            Err(LedgerError::InvalidQuantity(-1))
        );
        assert!(!ledger.contains("gold"));
    }

    #[test]
    fn test_add_overflow_fails_without_mutation() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("gold", i64::MAX, None).unwrap();
        assert_eq!(
            ledger.add_items("gold", 1, None),
            Err(LedgerError::Overflow("gold".to_string()))
        );
        assert_eq!(ledger.quantity("gold"), i64::MAX);
    }

    #[test]
    fn test_add_merges_meta_but_never_value() {
        let mut ledger = InventoryLedger::new();

        let meta = meta_fields([
            ("ATT", FieldValue::Int(10)),
            ("value", FieldValue::Int(999)),
            ("id", FieldValue::Int(777)),
        ]);
        ledger.add_items("sword", 3, Some(&meta)).unwrap();

        assert_eq!(ledger.quantity("sword"), 3);
        assert_eq!(ledger.meta_i64("sword", "ATT"), Some(10));
        assert_ne!(ledger.meta_i64("sword", "id"), Some(777));
    }

    #[test]
    fn test_add_meta_overwrites_existing_fields() {
        let mut ledger = InventoryLedger::new();

        ledger
            .add_items("sword", 1, Some(&meta_fields([("rarity", "common")])))
            .unwrap();
        ledger
            .add_items("sword", 1, Some(&meta_fields([("rarity", "rare")])))
            .unwrap();

        assert_eq!(ledger.meta_str("sword", "rarity"), Some("rare"));
    }

    #[test]
    fn test_remove_partial() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("arrows", 50, None).unwrap();
        assert_eq!(ledger.remove_items("arrows", 20), RemoveOutcome::Success);
        assert_eq!(ledger.quantity("arrows"), 30);
    }

    #[test]
    fn test_remove_to_zero_deletes_item() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("potion", 5, None).unwrap();
        assert_eq!(ledger.remove_items("potion", 5), RemoveOutcome::Success);

        assert!(!ledger.contains("potion"));
        assert_eq!(ledger.quantity("potion"), 0);
        assert!(ledger.has_exactly("potion", 0));
    }

    #[test]
    fn test_remove_more_than_held_is_rejected() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("gold", 10, None).unwrap();
        assert_eq!(ledger.remove_items("gold", 11), RemoveOutcome::Rejected);
        assert_eq!(ledger.quantity("gold"), 10);
    }

    #[test]
    fn test_remove_missing_item_is_invalid() {
        let mut ledger = InventoryLedger::new();

        assert_eq!(
            ledger.remove_items("nonexistent", 5),
            RemoveOutcome::Invalid
        );
    }

    #[test]
    fn test_remove_non_positive_qty_is_invalid() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("gold", 10, None).unwrap();
        assert_eq!(ledger.remove_items("gold", 0), RemoveOutcome::Invalid);
        assert_eq!(ledger.remove_items("gold", -3), RemoveOutcome::Invalid);
        assert_eq!(ledger.quantity("gold"), 10);
    }

    #[test]
    fn test_meta_math_add_round_trip() {
        let mut ledger = InventoryLedger::new();

        ledger
            .add_items("sword", 3, Some(&meta_fields([("ATT", 10i64)])))
            .unwrap();

        assert_eq!(ledger.meta_math_add("sword", "ATT", 5), Some(15));
        assert_eq!(ledger.meta_i64("sword", "ATT"), Some(15));
    }

    #[test]
    fn test_meta_math_add_unset_field_starts_at_zero() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("sword", 1, None).unwrap();
        assert_eq!(ledger.meta_math_add("sword", "kills", 3), Some(3));
    }

    #[test]
    fn test_meta_math_add_errors() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("sword", 1, None).unwrap();
        assert_eq!(ledger.meta_math_add("sword", "ATT", 0), None);
        assert_eq!(ledger.meta_math_add("sword", "ATT", -5), None);
        assert_eq!(ledger.meta_math_add("shield", "DEF", 5), None);
        assert_eq!(ledger.meta_i64("sword", "ATT"), Some(0));
    }

    #[test]
    fn test_meta_math_add_overflow_fails_without_mutation() {
        let mut ledger = InventoryLedger::new();

        ledger
            .add_items("sword", 1, Some(&meta_fields([("ATT", i64::MAX)])))
            .unwrap();

        assert_eq!(ledger.meta_math_add("sword", "ATT", 1), None);
        assert_eq!(ledger.meta_i64("sword", "ATT"), Some(i64::MAX));
    }

    #[test]
    fn test_meta_math_subtract_blocked_without_clamp() {
        let mut ledger = InventoryLedger::new();

        ledger
            .add_items("sword", 3, Some(&meta_fields([("ATT", 15i64)])))
            .unwrap();

        assert_eq!(ledger.meta_math_subtract("sword", "ATT", 20, false), None);
        assert_eq!(ledger.meta_i64("sword", "ATT"), Some(15));
    }

    #[test]
    fn test_meta_math_subtract_clamps_to_zero() {
        let mut ledger = InventoryLedger::new();

        ledger
            .add_items("sword", 3, Some(&meta_fields([("ATT", 15i64)])))
            .unwrap();

        assert_eq!(ledger.meta_math_subtract("sword", "ATT", 20, true), Some(0));
        assert_eq!(ledger.meta_i64("sword", "ATT"), Some(0));
    }

    #[test]
    fn test_meta_math_subtract_normal() {
        let mut ledger = InventoryLedger::new();

        ledger
            .add_items("sword", 3, Some(&meta_fields([("ATT", 15i64)])))
            .unwrap();

        assert_eq!(ledger.meta_math_subtract("sword", "ATT", 5, false), Some(10));
        assert_eq!(ledger.meta_i64("sword", "ATT"), Some(10));
    }

    #[test]
    fn test_meta_math_subtract_errors() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("sword", 1, None).unwrap();
        assert_eq!(ledger.meta_math_subtract("sword", "ATT", 0, false), None);
        assert_eq!(ledger.meta_math_subtract("shield", "DEF", 1, true), None);
    }

    #[test]
    fn test_set_meta_fields_skips_identity() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("sword", 1, None).unwrap();
        let before = ledger.meta_i64("sword", "id");

        let fields = meta_fields([
            ("id", FieldValue::Str("x".into())),
            ("rarity", FieldValue::Str("rare".into())),
        ]);
        assert!(ledger.set_meta_fields("sword", &fields));

        assert_eq!(ledger.meta_str("sword", "rarity"), Some("rare"));
        assert_eq!(ledger.meta_i64("sword", "id"), before);
    }

    #[test]
    fn test_set_meta_fields_identity_skip_is_case_insensitive() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("sword", 1, None).unwrap();
        let before = ledger.meta_i64("sword", "id");

        ledger.set_meta_field("sword", "ID", FieldValue::Int(42));
        ledger.set_meta_field("sword", "Id", FieldValue::Int(42));

        assert_eq!(ledger.meta_i64("sword", "id"), before);
    }

    #[test]
    fn test_set_meta_fields_missing_item() {
        let mut ledger = InventoryLedger::new();

        assert!(!ledger.set_meta_fields("ghost", &meta_fields([("a", 1i64)])));
        assert!(!ledger.set_meta_field("ghost", "a", 1i64));
    }

    #[test]
    fn test_set_meta_fields_empty_map_on_existing_item() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("sword", 1, None).unwrap();
        assert!(ledger.set_meta_fields("sword", &MetaFields::new()));
    }

    #[test]
    fn test_has_at_least_is_strictly_greater_than() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("gold", 10, None).unwrap();
        // Locked in: the comparison is strict, despite the name.
        assert!(!ledger.has_at_least("gold", 10));

        ledger.add_items("gold", 1, None).unwrap();
        assert!(ledger.has_at_least("gold", 10));

        assert!(ledger.has_at_least("absent", 0));
        assert!(!ledger.has_at_least("absent", 1));
    }

    #[test]
    fn test_does_not_have() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("gold", 10, None).unwrap();
        assert!(ledger.does_not_have("gold", 11));
        assert!(!ledger.does_not_have("gold", 10));
        assert!(!ledger.does_not_have("gold", 9));
        assert!(ledger.does_not_have("absent", 0));
    }

    #[test]
    fn test_has_exactly() {
        let mut ledger = InventoryLedger::new();

        ledger.add_items("gold", 10, None).unwrap();
        assert!(ledger.has_exactly("gold", 10));
        assert!(!ledger.has_exactly("gold", 9));
        assert!(ledger.has_exactly("absent", 0));
        assert!(!ledger.has_exactly("absent", 1));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut ledger = InventoryLedger::new();

        ledger
            .add_items("sword", 3, Some(&meta_fields([("ATT", 10i64)])))
            .unwrap();
        ledger.add_items("gold", 250, None).unwrap();
        ledger.set_meta_field("sword", "rarity", "rare");

        let snapshot = ledger.to_snapshot().unwrap();
        let restored = InventoryLedger::from_snapshot(&snapshot).unwrap();

        assert_eq!(restored.item_names(), ledger.item_names());
        assert_eq!(restored.quantity("sword"), 3);
        assert_eq!(restored.quantity("gold"), 250);
        assert_eq!(restored.meta_i64("sword", "ATT"), Some(10));
        assert_eq!(restored.meta_str("sword", "rarity"), Some("rare"));
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut ledger = InventoryLedger::new();
        ledger.add_items("sword", 3, None).unwrap();

        let mut fresh = InventoryLedger::new();
        fresh.add_items("gold", 5, None).unwrap();

        ledger.replace(fresh);

        assert!(!ledger.contains("sword"));
        assert_eq!(ledger.quantity("gold"), 5);
    }

    #[test]
    fn test_storage_key() {
        assert_eq!(InventoryLedger::storage_key("user42"), "user42_inventory");
    }
}
