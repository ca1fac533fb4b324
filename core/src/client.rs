//! Calls declared endpoints and returns a uniform `Outcome` for each call.
//!
//! # Design
//! `Client` holds the base URL, a transport and the outcome adapter (which
//! owns the codec), all fixed at construction. Build it once at startup and
//! share it behind an `Arc`; it carries no mutable state between calls.
//!
//! A call is split the same way for every endpoint: `request` builds the
//! `HttpRequest`, the transport executes it, `RawResponse::decode` runs the
//! body through the empty-body normalizer, and `OutcomeAdapter::wrap` turns
//! the exchange into an `Outcome`. Any failure on the way, including a request
//! body that cannot be encoded, ends up in that `Outcome`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::adapter::OutcomeAdapter;
use crate::codec::{Codec, JsonCodec};
use crate::config::ClientConfig;
use crate::endpoint::{Args, Endpoint};
use crate::error::{ConfigError, TransportFault};
use crate::http::{HttpRequest, RawResponse};
use crate::outcome::Outcome;
use crate::transport::{Transport, UreqTransport};

pub struct Client<Tr = UreqTransport, C = JsonCodec> {
    base_url: String,
    transport: Tr,
    adapter: OutcomeAdapter<C>,
}

impl Client {
    /// Client over `ureq` and JSON, configured from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let transport = UreqTransport::new(&config);
        let codec = JsonCodec::with_lenient(config.lenient);
        Ok(Self::with_transport(&config.base_url, transport, codec))
    }
}

impl<Tr: Transport, C: Codec> Client<Tr, C> {
    pub fn with_transport(base_url: &str, transport: Tr, codec: C) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            adapter: OutcomeAdapter::new(codec),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn adapter(&self) -> &OutcomeAdapter<C> {
        &self.adapter
    }

    /// Call `endpoint` and adapt the result. Never fails on its own; inspect
    /// or unwrap the returned `Outcome`.
    pub async fn invoke<T, B>(&self, endpoint: &Endpoint<T>, args: Args<'_, B>) -> Outcome<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        tracing::debug!(endpoint = ?endpoint, "invoke");
        self.adapter.wrap(self.exchange(endpoint, args)).await
    }

    /// Build the request for `endpoint` without executing it.
    pub fn request<T, B: Serialize>(
        &self,
        endpoint: &Endpoint<T>,
        args: Args<'_, B>,
    ) -> Result<HttpRequest, TransportFault> {
        let path = endpoint.render_path(&args.params);
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let codec = self.adapter.normalizer().codec();

        let (headers, body) = match &args.body {
            Some(body) => {
                let bytes = codec.encode(body).map_err(TransportFault::Encode)?;
                let headers = vec![("content-type".to_string(), codec.content_type().to_string())];
                (headers, Some(bytes))
            }
            None => (Vec::new(), None),
        };

        Ok(HttpRequest {
            method: endpoint.method(),
            url,
            headers,
            body,
        })
    }

    async fn exchange<T, B>(
        &self,
        endpoint: &Endpoint<T>,
        args: Args<'_, B>,
    ) -> Result<RawResponse<T>, TransportFault>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let request = self.request(endpoint, args)?;
        let response = self.transport.execute(request).await?;
        RawResponse::decode(response, self.adapter.normalizer())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::io;
    use std::sync::Mutex;

    use super::*;
    use crate::error::{ErrorInfo, ErrorKind, ServiceError};
    use crate::http::{HttpMethod, HttpResponse};
    use crate::types::CommonResponse;

    /// Replays one canned result and records the request it was given.
    struct StubTransport {
        reply: Mutex<Option<Result<HttpResponse, TransportFault>>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl StubTransport {
        fn status(status: u16, body: &str) -> Self {
            Self::replying(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.as_bytes().to_vec(),
            }))
        }

        fn replying(reply: Result<HttpResponse, TransportFault>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for StubTransport {
        fn execute(
            &self,
            request: HttpRequest,
        ) -> impl Future<Output = Result<HttpResponse, TransportFault>> + Send {
            self.seen.lock().unwrap().push(request);
            let reply = self.reply.lock().unwrap().take().expect("stub called twice");
            async move { reply }
        }
    }

    fn client(transport: StubTransport) -> Client<StubTransport> {
        Client::with_transport("http://localhost:3000/", transport, JsonCodec::new())
    }

    const SUCCESS: Endpoint<CommonResponse<String>> = Endpoint::get("api/success/");
    const PLAIN: Endpoint<String> = Endpoint::get("/api/plain/");
    const ITEM: Endpoint<CommonResponse<u32>> = Endpoint::get("api/items/{id}");
    const ECHO: Endpoint<CommonResponse<BTreeMap<String, String>>> = Endpoint::post("api/echo/");
    const NO_CONTENT: Endpoint<()> = Endpoint::delete("api/no-content/");

    #[test]
    fn request_joins_base_url_and_path() {
        let c = client(StubTransport::status(200, ""));
        let req = c.request(&PLAIN, Args::new()).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/plain/");
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn request_renders_path_params() {
        let c = client(StubTransport::status(200, ""));
        let req = c.request(&ITEM, Args::new().param("id", 12)).unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/items/12");
    }

    #[test]
    fn request_encodes_body() {
        let c = client(StubTransport::status(200, ""));
        let body = BTreeMap::from([("name".to_string(), "milk".to_string())]);
        let req = c.request(&ECHO, Args::new().body(&body)).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let sent: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent["name"], "milk");
    }

    #[test]
    fn request_encode_failure_is_a_fault() {
        // JSON object keys must be strings.
        let body = BTreeMap::from([(vec![1u8], 1u8)]);
        let c = client(StubTransport::status(200, ""));
        let err = c.request(&ECHO, Args::new().body(body)).unwrap_err();
        assert!(matches!(err, TransportFault::Encode(_)));
    }

    #[tokio::test]
    async fn invoke_success_envelope() {
        let c = client(StubTransport::status(
            200,
            r#"{"code":200,"message":"ok","data":"hello"}"#,
        ));
        let envelope = c.invoke(&SUCCESS, Args::new()).await.into_result().unwrap();
        assert_eq!(envelope.data, "hello");
        assert_eq!(c.transport.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invoke_plain_string() {
        let c = client(StubTransport::status(200, "hello"));
        let outcome = c.invoke(&PLAIN, Args::new()).await;
        assert_eq!(outcome.success().as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn invoke_empty_body_for_required_payload() {
        let c = client(StubTransport::status(200, ""));
        let err = c.invoke(&PLAIN, Args::new()).await.into_result().unwrap_err();
        assert_eq!(err.code(), Some(-1));
        assert_eq!(err.message(), "non-optional return type received null");
    }

    #[tokio::test]
    async fn invoke_no_content_for_unit_payload() {
        let c = client(StubTransport::status(204, ""));
        assert!(c.invoke(&NO_CONTENT, Args::new()).await.is_success());
    }

    #[tokio::test]
    async fn invoke_server_error() {
        let c = client(StubTransport::status(
            404,
            r#"{"errorCode":40401,"message":"not found"}"#,
        ));
        let outcome = c.invoke(&ITEM, Args::new().param("id", 404)).await;
        match outcome.failure() {
            Some(ErrorInfo::Service(err)) => assert_eq!(err, ServiceError::new(40401, "not found")),
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invoke_transport_fault() {
        let fault = TransportFault::Io(io::Error::from(io::ErrorKind::TimedOut));
        let c = client(StubTransport::replying(Err(fault)));
        let err = c.invoke(&PLAIN, Args::new()).await.failure().unwrap();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.message(), "not connected to the internet");
    }

    #[tokio::test]
    async fn invoke_undecodable_success_body() {
        let c = client(StubTransport::status(200, "{broken"));
        let err = c.invoke(&SUCCESS, Args::new()).await.failure().unwrap();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.message().starts_with("json codec: "));
    }

    #[tokio::test]
    async fn invoke_encode_failure_never_reaches_transport() {
        let c = client(StubTransport::status(200, ""));
        let body = BTreeMap::from([(vec![1u8], 1u8)]);
        let err = c.invoke(&ECHO, Args::new().body(body)).await.failure().unwrap();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(c.transport.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn with_transport_trims_trailing_slash() {
        let c = client(StubTransport::status(200, ""));
        assert_eq!(c.base_url(), "http://localhost:3000");
    }

    #[test]
    fn new_applies_config() {
        let config = ClientConfig {
            lenient: false,
            ..ClientConfig::new("http://127.0.0.1:3000/").unwrap()
        };
        let c = Client::new(config).unwrap();
        assert_eq!(c.base_url(), "http://127.0.0.1:3000");
        assert!(!c.adapter().normalizer().codec().is_lenient());
    }

    #[test]
    fn new_rejects_base_url_without_scheme() {
        let config = ClientConfig {
            base_url: "localhost".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(Client::new(config), Err(ConfigError::InvalidBaseUrl(_))));
    }
}
