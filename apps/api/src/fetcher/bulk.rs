//! Batch page downloads: fetches job postings one by one and saves their visible text.
//!
//! Sequential on purpose: a politeness delay separates requests and every URL gets
//! its own isolated outcome. A failing URL is recorded and the batch moves on.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::config::FetchConfig;
use crate::fetcher::extract::extract_visible_text;
use crate::fetcher::naming::{filename_stem, write_unique};

/// Outcome for a single input URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResult {
    pub url: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchResult {
    fn succeeded(url: &str, filename: String, text: String) -> Self {
        Self {
            url: url.to_string(),
            success: true,
            filename: Some(filename),
            text: Some(text),
            error: None,
        }
    }

    fn failed(url: &str, error: &anyhow::Error) -> Self {
        Self {
            url: url.to_string(),
            success: false,
            filename: None,
            text: None,
            error: Some(format!("{error:#}")),
        }
    }
}

/// Batch report. `results` mirrors input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub output_dir: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<FetchResult>,
}

/// HTTP page fetcher shared by the single-posting scrape and the bulk run.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    delay: Duration,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            delay: Duration::from_millis(config.delay_ms),
        })
    }

    /// GETs `raw_url` and returns the visible text of the page.
    /// Non-2xx statuses are errors.
    pub async fn fetch_text(&self, raw_url: &str) -> Result<String> {
        let url = parse_http_url(raw_url)?;

        let body = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch page")?
            .error_for_status()
            .context("Server returned an error status")?
            .text()
            .await
            .context("Failed to read page body")?;

        Ok(extract_visible_text(&body))
    }

    /// Fetches every URL in order and writes one text file per success under `output_dir`.
    ///
    /// Only a failure to create `output_dir` aborts the batch; everything after that is
    /// captured per URL.
    pub async fn fetch_all(&self, urls: &[String], output_dir: &Path) -> Result<FetchSummary> {
        tokio::fs::create_dir_all(output_dir)
            .await
            .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

        let started_at = Utc::now();
        let total = urls.len();
        info!("Fetching {total} URLs into {}", output_dir.display());

        let mut results = Vec::with_capacity(total);
        for (idx, url) in urls.iter().enumerate() {
            if idx > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            info!("Processing {}/{total}: {url}", idx + 1);
            let result = match self.fetch_and_save(url, output_dir).await {
                Ok((filename, text)) => {
                    info!("Saved {url} -> {filename}");
                    FetchResult::succeeded(url, filename, text)
                }
                Err(e) => {
                    warn!("Failed {url}: {e:#}");
                    FetchResult::failed(url, &e)
                }
            };
            results.push(result);
        }

        let success = results.iter().filter(|r| r.success).count();
        let summary = FetchSummary {
            total,
            success,
            failed: total - success,
            output_dir: output_dir.display().to_string(),
            started_at,
            finished_at: Utc::now(),
            results,
        };

        info!(
            "Fetch complete: total={}, success={}, failed={}",
            summary.total, summary.success, summary.failed
        );
        Ok(summary)
    }

    async fn fetch_and_save(&self, raw_url: &str, output_dir: &Path) -> Result<(String, String)> {
        let url = parse_http_url(raw_url)?;
        let text = self.fetch_text(raw_url).await?;

        let dir: PathBuf = output_dir.to_path_buf();
        let stem = filename_stem(&url);
        let contents = format!("Source URL: {raw_url}\n\n{text}");

        let filename = tokio::task::spawn_blocking(move || write_unique(&dir, &stem, &contents))
            .await
            .map_err(|e| anyhow!("File write task panicked: {e}"))?
            .context("Failed to write extracted text")?;

        Ok((filename, text))
    }
}

/// Parses an absolute http(s) URL.
pub fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid URL '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("Unsupported URL scheme '{other}'"),
    }
}

/// Adds `https://` to a URL typed without a scheme.
pub fn normalize_scheme(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

/// Reads a URL list: one URL per line, blank lines ignored.
///
/// CSV input goes through the `csv` reader so quoted fields keep their commas. Only
/// the first column is used and a leading `url` header row is skipped.
pub fn parse_url_list(contents: &str, is_csv: bool) -> Result<Vec<String>> {
    let mut urls: Vec<String> = if is_csv {
        first_csv_column(contents)?
    } else {
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    };

    if is_csv && urls.first().is_some_and(|h| h.eq_ignore_ascii_case("url")) {
        urls.remove(0);
    }
    Ok(urls)
}

fn first_csv_column(contents: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut urls = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to parse CSV row")?;
        if let Some(first) = record.get(0).filter(|f| !f.is_empty()) {
            urls.push(first.to_string());
        }
    }
    Ok(urls)
}
