use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;

pub const DEFAULT_ANALYSIS_ENDPOINT: &str = "http://127.0.0.1:5000/analyze";
const DEFAULT_ANALYSIS_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup fails only on unparsable values.
#[derive(Debug, Clone)]
pub struct Config {
    pub analysis_endpoint: Url,
    /// `None` when `ANALYSIS_TIMEOUT_SECS=0`.
    pub analysis_timeout: Option<Duration>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint = var("ANALYSIS_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_ANALYSIS_ENDPOINT.to_string());
        let analysis_endpoint = Url::parse(&endpoint)
            .with_context(|| format!("ANALYSIS_ENDPOINT '{endpoint}' is not a valid URL"))?;

        let timeout_secs = match var("ANALYSIS_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("ANALYSIS_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_ANALYSIS_TIMEOUT_SECS,
        };

        let max_upload_bytes = match var("MAX_UPLOAD_BYTES") {
            Some(v) => v
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a number of bytes")?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Config {
            analysis_endpoint,
            analysis_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            max_upload_bytes,
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
