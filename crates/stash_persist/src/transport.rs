//! Transport encoding for remote payloads
//!
//! Snapshots cross the remote store base64-encoded so the transport never has
//! to care about the snapshot's own format.

use crate::local::PersistError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Encode a snapshot for transport
pub fn encode_payload(snapshot: &str) -> String {
    STANDARD.encode(snapshot.as_bytes())
}

/// Decode a transported payload back into a snapshot
pub fn decode_payload(payload: &str) -> Result<String, PersistError> {
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| PersistError::Transport(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| PersistError::Transport(e.to_string()))
}
