//! Client configuration.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Default connect timeout, also used for reads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Settings fixed for the lifetime of a `Client`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is joined onto.
    pub base_url: String,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Time allowed for the response head and for the body.
    pub read_timeout: Duration,
    /// Accept bare text bodies for string payloads.
    pub lenient: bool,
    /// Log request and response bodies at trace level.
    pub log_bodies: bool,
    /// Largest response body read before the call fails; `None` reads any size.
    pub max_body_bytes: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
            lenient: true,
            log_bodies: false,
            max_body_bytes: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        validate_base_url(base_url)?;
        Ok(Self {
            base_url: base_url.to_string(),
            ..Self::default()
        })
    }

    /// Read `SERVER_URL`, `CONNECT_TIMEOUT_MS`, `READ_TIMEOUT_MS`,
    /// `LOG_BODIES` and `MAX_BODY_BYTES`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup("SERVER_URL") {
            validate_base_url(&url)?;
            config.base_url = url;
        }
        if let Some(value) = lookup("CONNECT_TIMEOUT_MS") {
            config.connect_timeout = parse_millis("CONNECT_TIMEOUT_MS", value)?;
        }
        if let Some(value) = lookup("READ_TIMEOUT_MS") {
            config.read_timeout = parse_millis("READ_TIMEOUT_MS", value)?;
        }
        if let Some(value) = lookup("LOG_BODIES") {
            config.log_bodies = parse_flag("LOG_BODIES", value)?;
        }
        if let Some(value) = lookup("MAX_BODY_BYTES") {
            config.max_body_bytes = Some(parse_bytes("MAX_BODY_BYTES", value)?);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url(&self.base_url)
    }

    pub fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }
}

fn validate_base_url(url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidBaseUrl(url.to_string()))
    }
}

fn parse_millis(var: &'static str, value: String) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(_) => Err(ConfigError::InvalidTimeout { var, value }),
    }
}

fn parse_bytes(var: &'static str, value: String) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(bytes) => Ok(bytes),
        Err(_) => Err(ConfigError::InvalidSize { var, value }),
    }
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { var, value }),
    }
}
