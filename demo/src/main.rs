//! Calls a success and an error endpoint and reports what came back.
//!
//! The client is built once here and handed to `TestApi`; a failed call is
//! rendered and logged, never allowed to abort the process.

mod api;
mod render;

use std::sync::Arc;

use outcome_core::{Client, ClientConfig, ErrorInfo};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::TestApi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(base_url = %config.base_url, "starting");
    let client = Arc::new(Client::new(config)?);
    let api = TestApi::new(client);

    if let Err(err) = run(&api).await {
        tracing::error!(kind = ?err.kind(), error = %err, "call failed");
        println!("{}", render::describe(&err));
    }
    Ok(())
}

async fn run(api: &TestApi) -> Result<(), ErrorInfo> {
    let data = api.success_api().await.into_result()?.data;
    println!("{data}");
    api.error_api().await.into_result()?;
    Ok(())
}
