//! Endpoints the demo screen calls.

use std::sync::Arc;

use outcome_core::{Args, Client, CommonResponse, Endpoint, Outcome};

const SUCCESS: Endpoint<CommonResponse<String>> = Endpoint::get("api/success/");
const ERROR: Endpoint<CommonResponse<String>> = Endpoint::get("api/error/");

/// Typed view over the shared client.
#[derive(Clone)]
pub struct TestApi {
    client: Arc<Client>,
}

impl TestApi {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub async fn success_api(&self) -> Outcome<CommonResponse<String>> {
        self.client.invoke(&SUCCESS, Args::new()).await
    }

    pub async fn error_api(&self) -> Outcome<CommonResponse<String>> {
        self.client.invoke(&ERROR, Args::new()).await
    }
}
