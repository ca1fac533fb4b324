use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommonResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_code: i32,
    pub message: String,
}

/// Highest id `/api/items/{id}` knows about.
pub const MAX_ITEM_ID: u32 = 99;

/// Length of the string `/api/large/` returns, above ureq's default body cap.
pub const LARGE_BODY_LEN: usize = 11 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    /// How long `/api/slow/` waits before answering.
    pub slow_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            slow_delay: Duration::from_millis(2000),
        }
    }
}

impl Settings {
    /// Read `SLOW_DELAY_MS`; an unset or invalid value keeps the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        if let Some(value) = lookup("SLOW_DELAY_MS") {
            match value.trim().parse::<u64>() {
                Ok(ms) => settings.slow_delay = Duration::from_millis(ms),
                Err(err) => tracing::warn!(
                    %value,
                    error = %err,
                    default = ?settings.slow_delay,
                    "ignoring invalid SLOW_DELAY_MS"
                ),
            }
        }
        settings
    }
}

pub fn app() -> Router {
    app_with(Settings::default())
}

pub fn app_with(settings: Settings) -> Router {
    Router::new()
        .route("/api/success/", get(success))
        .route("/api/error/", get(error))
        .route("/api/missing/", get(missing))
        .route("/api/plain/", get(plain))
        .route("/api/empty/", get(empty))
        .route("/api/no-content/", get(no_content).delete(no_content))
        .route("/api/broken/", get(broken))
        .route("/api/garbled/", get(garbled))
        .route("/api/slow/", get(slow))
        .route("/api/large/", get(large))
        .route("/api/items/{id}", get(item))
        .route("/api/echo/", post(echo))
        .with_state(settings)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Settings::default()).await
}

pub async fn run_with(listener: TcpListener, settings: Settings) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(settings)).await
}

fn ok<T>(data: T) -> Json<CommonResponse<T>> {
    Json(CommonResponse {
        code: 200,
        message: "success".to_string(),
        data,
    })
}

fn fail(status: StatusCode, error_code: i32, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error_code,
            message: message.to_string(),
        }),
    )
}

async fn success() -> Json<CommonResponse<String>> {
    ok("hello".to_string())
}

async fn error() -> (StatusCode, Json<ErrorResponse>) {
    fail(StatusCode::BAD_REQUEST, 40001, "bad request")
}

async fn missing() -> (StatusCode, Json<ErrorResponse>) {
    fail(StatusCode::NOT_FOUND, 40401, "not found")
}

async fn plain() -> &'static str {
    "hello"
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn garbled() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "<html>oops</html>")
}

async fn slow(State(settings): State<Settings>) -> Json<CommonResponse<String>> {
    tokio::time::sleep(settings.slow_delay).await;
    ok("finally".to_string())
}

async fn large() -> Json<String> {
    Json("a".repeat(LARGE_BODY_LEN))
}

async fn item(
    Path(id): Path<u32>,
) -> Result<Json<CommonResponse<u32>>, (StatusCode, Json<ErrorResponse>)> {
    if id > MAX_ITEM_ID {
        return Err(fail(StatusCode::NOT_FOUND, 40401, "not found"));
    }
    Ok(ok(id))
}

async fn echo(Json(body): Json<serde_json::Value>) -> Json<CommonResponse<serde_json::Value>> {
    ok(body)
}
