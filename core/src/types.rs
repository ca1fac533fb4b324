//! Wire DTOs shared by every endpoint.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any drift between the two crates.

use serde::{Deserialize, Serialize};

/// Code reported when a failed response carries no usable error payload.
pub const FALLBACK_ERROR_CODE: i32 = 404;

/// Message reported when a failed response carries no usable error payload.
pub const FALLBACK_ERROR_MESSAGE: &str = "no error message";

/// Error payload a server sends alongside a non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerErrorPayload {
    pub error_code: i32,
    pub message: String,
}

impl ServerErrorPayload {
    /// Payload used when the error body is absent, empty, or undecodable.
    ///
    /// A malformed body and a missing body both land here with the same
    /// code; callers cannot tell the two apart.
    pub fn fallback() -> Self {
        Self {
            error_code: FALLBACK_ERROR_CODE,
            message: FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Envelope wrapping the `data` of a successful call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommonResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}
