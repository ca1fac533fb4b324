//! Error types for the response-adaptation layer.
//!
//! # Design
//! Two families live here. `ErrorInfo` is what callers see inside a failed
//! `Outcome`: either a `ServiceError` (the server answered and said no) or a
//! `TransportError` (no interpretable answer came back). The remaining types
//! (`TransportFault`, `CodecError`, `ConfigError`) are the raw faults produced
//! below the adapter; a `TransportFault` ends up as the `source()` of a
//! `TransportError`.

use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Which side of the wire a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server responded with an unsuccessful result.
    Service,
    /// No usable response was obtained.
    Transport,
}

/// Structured error carried by `Outcome::Failure`.
#[derive(Debug, Clone, Error)]
pub enum ErrorInfo {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ErrorInfo {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorInfo::Service(_) => ErrorKind::Service,
            ErrorInfo::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Server-supplied code; transport errors have none.
    pub fn code(&self) -> Option<i32> {
        match self {
            ErrorInfo::Service(err) => Some(err.code),
            ErrorInfo::Transport(_) => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ErrorInfo::Service(err) => &err.message,
            ErrorInfo::Transport(err) => &err.message,
        }
    }
}

/// The server was reachable and answered with an unsuccessful result, or a
/// successful response arrived without the body its type requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code} : {message}")]
pub struct ServiceError {
    pub code: i32,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// No interpretable response was obtained. `message` is the categorized,
/// user-facing text; `cause` keeps the original fault.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    #[source]
    pub cause: Arc<TransportFault>,
}

/// A fault raised while producing the exchange, before any response could be
/// interpreted.
#[derive(Debug, Error)]
pub enum TransportFault {
    /// Connectivity, timeouts, refused connections, missing resources.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The HTTP exchange itself was malformed.
    #[error("http protocol error: {0}")]
    Protocol(String),

    /// A successful response body could not be decoded.
    #[error("{0}")]
    Decode(CodecError),

    /// The request body could not be encoded.
    #[error("{0}")]
    Encode(CodecError),

    #[error("{0}")]
    Other(String),
}

/// Failure inside the codec.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("json codec: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invalid client configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base url must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),

    #[error("{var} must be a number of milliseconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must be true or false, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },

    #[error("{var} must be a byte count, got {value:?}")]
    InvalidSize { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn service_error_accessors() {
        let err = ErrorInfo::from(ServiceError::new(40401, "not found"));
        assert_eq!(err.kind(), ErrorKind::Service);
        assert_eq!(err.code(), Some(40401));
        assert_eq!(err.message(), "not found");
        assert_eq!(err.to_string(), "40401 : not found");
    }

    #[test]
    fn transport_error_exposes_fault_as_source() {
        let fault = TransportFault::Io(io::Error::new(io::ErrorKind::TimedOut, "timed out"));
        let err = ErrorInfo::from(TransportError {
            message: "not connected to the internet".to_string(),
            cause: Arc::new(fault),
        });
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.code(), None);
        assert_eq!(err.to_string(), "not connected to the internet");
        let fault = err.source().unwrap();
        assert_eq!(fault.to_string(), "timed out");
    }

    #[test]
    fn codec_error_wraps_serde_message() {
        let err = serde_json::from_str::<u32>("x").unwrap_err();
        let codec = CodecError::from(err);
        assert!(codec.to_string().starts_with("json codec: "));
        let fault = TransportFault::Decode(codec);
        assert!(fault.to_string().starts_with("json codec: "));
    }
}
