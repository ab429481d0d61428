//! JSON snapshot codec for persona records.

use crate::error::{Error, Result};
use crate::persona::PersonaRecord;

/// Media type of an encoded snapshot.
pub const SNAPSHOT_MEDIA_TYPE: &str = "application/json; charset=utf-8";

/// File extension of an encoded snapshot.
pub const SNAPSHOT_EXTENSION: &str = "json";

/// Encode a record as two-space indented JSON, keys in record order.
pub fn encode_snapshot(record: &PersonaRecord) -> Result<String> {
    serde_json::to_string_pretty(record).map_err(Error::SnapshotEncode)
}

/// Decode a snapshot. All ten keys are required and unknown keys are rejected.
pub fn decode_snapshot(content: &str) -> Result<PersonaRecord> {
    serde_json::from_str(content).map_err(|source| Error::SnapshotDecode {
        origin: None,
        source,
    })
}
