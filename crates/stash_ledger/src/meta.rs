//! Meta field maps

use stash_document::FieldValue;
use std::collections::HashMap;

/// Reserved field holding the item quantity, managed only by the quantity
/// operations
pub const VALUE_FIELD: &str = "value";

/// Reserved field holding the document store's internal node identity
pub const ID_FIELD: &str = "id";

/// A set of meta fields to write onto an item
pub type MetaFields = HashMap<String, FieldValue>;

/// Check whether a meta key names the store-internal identity field
///
/// The identity key is matched case-insensitively; all other field names stay
/// case-sensitive.
pub fn is_identity_key(key: &str) -> bool {
    key.eq_ignore_ascii_case(ID_FIELD)
}

/// Build a [`MetaFields`] map from key/value pairs
pub fn meta_fields<K, V, I>(entries: I) -> MetaFields
where
    K: Into<String>,
    V: Into<FieldValue>,
    I: IntoIterator<Item = (K, V)>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
