//! Value Codec Port
//!
//! Pluggable serializer turning cache values into the string payloads held by
//! the [`KeyValueStore`](super::store::KeyValueStore).

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serializer used by the cache client for entries and envelopes
///
/// Encodings must never be empty: the empty string is reserved for the null
/// marker.
pub trait ValueCodec: Send + Sync + 'static {
    /// Encode a value into its stored representation
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String>;

    /// Decode a stored representation
    fn decode<T: DeserializeOwned>(&self, raw: &str) -> Result<T>;

    /// Codec identifier for diagnostics
    fn name(&self) -> &str;
}

/// JSON codec backed by `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Create a new JSON codec
    pub fn new() -> Self {
        Self
    }
}

impl ValueCodec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = serde_json::to_string(value)?;
        if json.trim().is_empty() {
            return Err(Error::serialization("encoded value is empty"));
        }
        Ok(json)
    }

    fn decode<T: DeserializeOwned>(&self, raw: &str) -> Result<T> {
        Ok(serde_json::from_str(raw)?)
    }

    fn name(&self) -> &str {
        "json"
    }
}
