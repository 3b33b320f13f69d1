use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub scrape_output_dir: PathBuf,
    pub fetch: FetchConfig,
    pub pdf_service_url: String,
    pub max_upload_bytes: usize,
}

/// Settings for outbound page fetches.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    /// Pause before every request after the first in a batch.
    pub delay_ms: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            delay_ms: 1000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let fetch_defaults = FetchConfig::default();

        Ok(Config {
            port: parse_env("PORT", 3001)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            scrape_output_dir: std::env::var("SCRAPE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("downloaded_jobs")),
            fetch: FetchConfig {
                timeout_secs: parse_env("FETCH_TIMEOUT_SECS", fetch_defaults.timeout_secs)?,
                delay_ms: parse_env("FETCH_DELAY_MS", fetch_defaults.delay_ms)?,
                user_agent: std::env::var("FETCH_USER_AGENT")
                    .unwrap_or(fetch_defaults.user_agent),
            },
            pdf_service_url: std::env::var("PDF_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:3002".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 16 * 1024 * 1024)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
