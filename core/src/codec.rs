//! Body codecs.
//!
//! # Design
//! The codec is the only place that knows the wire format. Everything above
//! it (normalizer, adapter, client) is written against the `Codec` trait so the
//! adapter's classification rules do not depend on JSON.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CodecError;

/// Decodes response bodies into typed payloads and encodes request bodies.
pub trait Codec: Send + Sync {
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// The value a declared payload type takes when the body is absent, if the
    /// type permits absence at all. Most types do not.
    fn absent<T: DeserializeOwned>(&self) -> Option<T> {
        None
    }

    fn content_type(&self) -> &'static str;
}

/// `serde_json` codec.
///
/// In lenient mode a body that is not valid JSON but is valid UTF-8 is retried
/// as a JSON string, so a bare `hello` decodes into a `String` target.
#[derive(Debug, Clone, Copy)]
pub struct JsonCodec {
    lenient: bool,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self { lenient: true }
    }

    pub fn strict() -> Self {
        Self { lenient: false }
    }

    pub fn with_lenient(lenient: bool) -> Self {
        Self { lenient }
    }

    pub fn is_lenient(&self) -> bool {
        self.lenient
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for JsonCodec {
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        let err = match serde_json::from_slice(bytes) {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if self.lenient && err.is_syntax() {
            if let Ok(text) = std::str::from_utf8(bytes) {
                let as_string = serde_json::Value::String(text.to_string());
                if let Ok(value) = serde_json::from_value(as_string) {
                    return Ok(value);
                }
            }
        }
        Err(err.into())
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(value)?)
    }

    fn absent<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(serde_json::Value::Null).ok()
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
