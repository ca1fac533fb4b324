//! Converts one HTTP exchange into exactly one `Outcome`.
//!
//! # Design
//! An exchange either produced a response (`Ok(RawResponse)`) or never got
//! that far (`Err(TransportFault)`). Both paths end in an `Outcome`; nothing
//! here returns an error or panics, so a caller awaiting a wrapped call always
//! gets a value it can match on.
//!
//! Response path:
//! - 2xx with a body is `Success`.
//! - 2xx without a body is a `ServiceError` with code -1. Types that permit an
//!   absent body are resolved earlier by the empty-body normalizer and never
//!   arrive here empty.
//! - non-2xx reads the error body as a `ServerErrorPayload`; if it is missing,
//!   empty or malformed the fallback payload (404) is used.
//!
//! Fault path: the fault is classified into a short user-facing message and
//! kept as the cause of a `TransportError`.

use std::future::Future;
use std::io;
use std::sync::Arc;

use crate::codec::{Codec, JsonCodec};
use crate::error::{ServiceError, TransportError, TransportFault};
use crate::http::RawResponse;
use crate::normalizer::EmptyBodyNormalizer;
use crate::outcome::Outcome;
use crate::types::ServerErrorPayload;

/// Code of the failure reported for a 2xx response without a required body.
pub const NULL_BODY_CODE: i32 = -1;

pub const NULL_BODY_MESSAGE: &str = "non-optional return type received null";

pub const NOT_FOUND_MESSAGE: &str = "file not found";
pub const NOT_CONNECTED_MESSAGE: &str = "not connected to the internet";
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error occurred";

#[derive(Debug, Clone, Default)]
pub struct OutcomeAdapter<C = JsonCodec> {
    normalizer: EmptyBodyNormalizer<C>,
}

impl<C: Codec> OutcomeAdapter<C> {
    pub fn new(codec: C) -> Self {
        Self {
            normalizer: EmptyBodyNormalizer::new(codec),
        }
    }

    pub fn normalizer(&self) -> &EmptyBodyNormalizer<C> {
        &self.normalizer
    }

    /// Await an endpoint call and adapt whatever it produced.
    ///
    /// Dropping the returned future before `call` completes yields no
    /// outcome at all.
    pub async fn wrap<T, F>(&self, call: F) -> Outcome<T>
    where
        F: Future<Output = Result<RawResponse<T>, TransportFault>>,
    {
        self.adapt(call.await)
    }

    pub fn adapt<T>(&self, exchange: Result<RawResponse<T>, TransportFault>) -> Outcome<T> {
        match exchange {
            Ok(response) => self.adapt_response(response),
            Err(fault) => adapt_fault(fault),
        }
    }

    pub fn adapt_response<T>(&self, response: RawResponse<T>) -> Outcome<T> {
        let status = response.status;
        if response.is_successful() {
            return match response.body {
                Some(body) => {
                    tracing::debug!(status, "call succeeded");
                    Outcome::Success(body)
                }
                None => {
                    tracing::warn!(status, "successful response without a required body");
                    ServiceError::new(NULL_BODY_CODE, NULL_BODY_MESSAGE).into()
                }
            };
        }

        let payload = self.read_error_body(response.error_body.as_deref());
        tracing::warn!(
            status,
            code = payload.error_code,
            server_message = %payload.message,
            "service error"
        );
        ServiceError::new(payload.error_code, payload.message).into()
    }

    fn read_error_body(&self, error_body: Option<&[u8]>) -> ServerErrorPayload {
        let Some(bytes) = error_body else {
            return ServerErrorPayload::fallback();
        };
        match self.normalizer.decode::<ServerErrorPayload>(bytes) {
            Ok(Some(payload)) => payload,
            Ok(None) => ServerErrorPayload::fallback(),
            Err(err) => {
                tracing::debug!(error = %err, "error body is not a server error payload");
                ServerErrorPayload::fallback()
            }
        }
    }
}

/// Turn a fault that prevented any response into a transport failure.
pub fn adapt_fault<T>(fault: TransportFault) -> Outcome<T> {
    let message = classify_fault(&fault);
    tracing::warn!(error = %fault, reason = %message, "no response");
    TransportError {
        message,
        cause: Arc::new(fault),
    }
    .into()
}

/// User-facing message for a fault.
pub fn classify_fault(fault: &TransportFault) -> String {
    match fault {
        TransportFault::Io(err) if err.kind() == io::ErrorKind::NotFound => {
            NOT_FOUND_MESSAGE.to_string()
        }
        TransportFault::Io(_) => NOT_CONNECTED_MESSAGE.to_string(),
        TransportFault::Protocol(_) => UNKNOWN_ERROR_MESSAGE.to_string(),
        other => other.to_string(),
    }
}
