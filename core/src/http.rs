//! HTTP exchange types.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe the exchange as plain data so the
//! transport is swappable and the adapter can be tested without a network.
//! `RawResponse<T>` is the response after body decoding: the success body is
//! typed, the error body stays raw until the adapter decides how to read it.

use serde::de::DeserializeOwned;

use crate::codec::Codec;
use crate::error::TransportFault;
use crate::normalizer::EmptyBodyNormalizer;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// An HTTP response described as plain data, as returned by a `Transport`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A completed response with its success body decoded.
#[derive(Debug, Clone)]
pub struct RawResponse<T> {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<T>,
    pub error_body: Option<Vec<u8>>,
}

impl<T> RawResponse<T> {
    pub fn success(status: u16, body: Option<T>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body,
            error_body: None,
        }
    }

    pub fn error(status: u16, error_body: Option<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: None,
            error_body,
        }
    }

    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl<T: DeserializeOwned> RawResponse<T> {
    /// Decode a transport response through the empty-body normalizer.
    ///
    /// 204 and 205 carry no body and are never decoded. A success body the
    /// codec rejects is a transport fault, not a service error.
    pub fn decode<C: Codec>(
        response: HttpResponse,
        normalizer: &EmptyBodyNormalizer<C>,
    ) -> Result<Self, TransportFault> {
        let successful = response.is_successful();
        let HttpResponse {
            status,
            headers,
            body,
        } = response;

        if !successful {
            return Ok(Self {
                status,
                headers,
                body: None,
                error_body: Some(body),
            });
        }

        let decoded = if status == 204 || status == 205 {
            normalizer.absent()
        } else {
            normalizer
                .decode_payload(&body)
                .map_err(TransportFault::Decode)?
        };
        Ok(Self {
            status,
            headers,
            body: decoded,
            error_body: None,
        })
    }
}
