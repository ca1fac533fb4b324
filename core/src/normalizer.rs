//! Empty-body guard in front of the codec.
//!
//! A zero-length body never reaches the codec: it decodes to `None`. Faults on
//! non-empty input are passed through untouched so the caller decides how to
//! classify them.

use serde::de::DeserializeOwned;

use crate::codec::{Codec, JsonCodec};
use crate::error::CodecError;

#[derive(Debug, Clone, Default)]
pub struct EmptyBodyNormalizer<C = JsonCodec> {
    codec: C,
}

impl<C: Codec> EmptyBodyNormalizer<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// `Ok(None)` for an empty body, otherwise whatever the codec returns.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Option<T>, CodecError> {
        if bytes.is_empty() {
            return Ok(None);
        }
        self.codec.decode(bytes).map(Some)
    }

    /// Like `decode`, but an empty body resolves to the declared type's own
    /// absent value when it has one (`()`, `Option<_>`).
    pub fn decode_payload<T: DeserializeOwned>(
        &self,
        bytes: &[u8],
    ) -> Result<Option<T>, CodecError> {
        Ok(self.decode(bytes)?.or_else(|| self.absent()))
    }

    /// Absent value of the declared type, for responses that carry no body.
    pub fn absent<T: DeserializeOwned>(&self) -> Option<T> {
        self.codec.absent()
    }
}
