//! Uniform success/failure outcomes for HTTP API calls.
//!
//! # Overview
//! Every call made through `Client::invoke` resolves to an `Outcome<T>`:
//! either the decoded payload, or a structured `ErrorInfo` that says whether
//! the server answered with an error (`ServiceError`, with its code and
//! message) or no usable answer arrived at all (`TransportError`). Calls never
//! fail on their own; callers unwrap the outcome with `into_result` when they
//! want `?` semantics.
//!
//! # Design
//! - `OutcomeAdapter` is the single place where raw responses and transport
//!   faults are classified.
//! - `EmptyBodyNormalizer` keeps zero-length bodies away from the codec.
//! - `Transport` and `Codec` are traits; `UreqTransport` and `JsonCodec` are
//!   the shipped implementations.
//! - `Client` is immutable after construction and meant to be built once and
//!   shared.

pub mod adapter;
pub mod client;
pub mod codec;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod normalizer;
pub mod outcome;
pub mod transport;
pub mod types;

pub use adapter::{adapt_fault, classify_fault, OutcomeAdapter};
pub use client::Client;
pub use codec::{Codec, JsonCodec};
pub use config::ClientConfig;
pub use endpoint::{Args, Endpoint};
pub use error::{
    CodecError, ConfigError, ErrorInfo, ErrorKind, ServiceError, TransportError, TransportFault,
};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RawResponse};
pub use normalizer::EmptyBodyNormalizer;
pub use outcome::Outcome;
pub use transport::{Transport, UreqTransport};
pub use types::{CommonResponse, ServerErrorPayload};
