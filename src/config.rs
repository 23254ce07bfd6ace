use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_UPSTREAM_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-05-20:generateContent";

const CREDENTIAL_NAME: &str = "GEMINI_API_KEY";
const DEFAULT_PLATFORM: &str = "the server environment";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

// matches axum's own default body limit
const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_ADDR is not a valid socket address: {0}")]
    BindAddr(String),
    #[error("MAX_BODY_BYTES is not a valid byte count: {0}")]
    MaxBodyBytes(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    // None when the key is unset; the forward route answers 500 instead of refusing to start
    pub api_key: Option<String>,
    pub credential_name: String,
    pub platform: String,
    pub upstream_url: String,
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
}

impl Config {

    pub fn from_env() -> Result<Self, ConfigError> {

        Self::from_lookup(|name| std::env::var(name).ok())

    }

    // any variable source works, tests pass a map instead of touching the environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {

        // an empty key is as good as no key
        let api_key = lookup(CREDENTIAL_NAME)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let platform = lookup("PLATFORM_NAME")
            .unwrap_or_else(|| DEFAULT_PLATFORM.to_string());

        let upstream_url = lookup("UPSTREAM_URL")
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());

        let bind_raw = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::BindAddr(bind_raw.clone()))?;

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::MaxBodyBytes(raw.clone()))?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Config {
            api_key,
            credential_name: CREDENTIAL_NAME.to_string(),
            platform,
            upstream_url,
            bind_addr,
            max_body_bytes,
        })

    }

    #[cfg(test)]
    pub fn for_upstream(upstream_url: &str, api_key: Option<&str>) -> Self {

        Config {
            api_key: api_key.map(str::to_string),
            credential_name: CREDENTIAL_NAME.to_string(),
            platform: "test".to_string(),
            upstream_url: upstream_url.to_string(),
            bind_addr: ([127, 0, 0, 1], 0).into(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }

    }

}
