//! Executes `HttpRequest`s.
//!
//! # Design
//! The adapter only needs "a response or a fault", so the network sits behind
//! the `Transport` trait. `UreqTransport` runs a blocking `ureq` agent on the
//! tokio blocking pool. The agent is configured to return 4xx/5xx as data
//! rather than `Err`, leaving status interpretation to the adapter; only
//! failures to obtain a response become `TransportFault`s.

use std::future::Future;
use std::io;

use crate::config::ClientConfig;
use crate::error::TransportFault;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP exchange.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportFault>> + Send;
}

/// `ureq`-backed transport with fixed connect and read timeouts.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    body_limit: u64,
    log_bodies: bool,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(config.connect_timeout))
            .timeout_recv_response(Some(config.read_timeout))
            .timeout_recv_body(Some(config.read_timeout))
            .build()
            .new_agent();
        Self {
            agent,
            // ureq caps bodies at 10 MiB unless told otherwise.
            body_limit: config.max_body_bytes.unwrap_or(u64::MAX),
            log_bodies: config.log_bodies,
        }
    }
}

impl Transport for UreqTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportFault>> + Send {
        let agent = self.agent.clone();
        let body_limit = self.body_limit;
        let log_bodies = self.log_bodies;
        async move {
            tokio::task::spawn_blocking(move || {
                execute_blocking(&agent, request, body_limit, log_bodies)
            })
                .await
                .map_err(|err| TransportFault::Other(format!("transport task failed: {err}")))?
        }
    }
}

fn execute_blocking(
    agent: &ureq::Agent,
    request: HttpRequest,
    body_limit: u64,
    log_bodies: bool,
) -> Result<HttpResponse, TransportFault> {
    let HttpRequest {
        method,
        url,
        headers,
        body,
    } = request;

    tracing::debug!(method = method.as_str(), url = %url, "--> request");
    if log_bodies {
        if let Some(body) = &body {
            tracing::trace!(body = %String::from_utf8_lossy(body), "--> body");
        }
    }

    let result = match (method, body) {
        (HttpMethod::Get, _) => with_headers(agent.get(&url), &headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(&url), &headers).call(),
        (HttpMethod::Post, Some(body)) => with_headers(agent.post(&url), &headers).send(&body[..]),
        (HttpMethod::Post, None) => with_headers(agent.post(&url), &headers).send_empty(),
        (HttpMethod::Put, Some(body)) => with_headers(agent.put(&url), &headers).send(&body[..]),
        (HttpMethod::Put, None) => with_headers(agent.put(&url), &headers).send_empty(),
    };
    let mut response = result.map_err(fault_from_ureq)?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .with_config()
        .limit(body_limit)
        .read_to_vec()
        .map_err(fault_from_ureq)?;

    tracing::debug!(status, url = %url, bytes = body.len(), "<-- response");
    if log_bodies {
        tracing::trace!(body = %String::from_utf8_lossy(&body), "<-- body");
    }

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Map a `ureq` failure onto the fault classes the adapter distinguishes.
fn fault_from_ureq(err: ureq::Error) -> TransportFault {
    let message = err.to_string();
    match err {
        ureq::Error::Io(err) => TransportFault::Io(err),
        ureq::Error::Timeout(_) => {
            TransportFault::Io(io::Error::new(io::ErrorKind::TimedOut, message))
        }
        ureq::Error::ConnectionFailed => {
            TransportFault::Io(io::Error::new(io::ErrorKind::ConnectionRefused, message))
        }
        ureq::Error::HostNotFound => TransportFault::Io(io::Error::other(message)),
        ureq::Error::StatusCode(_) | ureq::Error::Http(_) | ureq::Error::Protocol(_) => {
            TransportFault::Protocol(message)
        }
        _ => TransportFault::Other(message),
    }
}
