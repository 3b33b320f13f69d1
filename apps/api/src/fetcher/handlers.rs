//! Axum route handlers for the Scrape API.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiJson, AppError};
use crate::fetcher::bulk::{normalize_scheme, parse_url_list, FetchSummary};
use crate::state::AppState;
use crate::uploads::{read_text_uploads, require_upload};

const URL_LIST_EXTENSIONS: &[&str] = &["txt", "csv"];

#[derive(Debug, Deserialize)]
pub struct ScrapeJobRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ScrapeJobResponse {
    pub success: bool,
    pub text: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkScrapeRequest {
    pub urls: Vec<String>,
}

/// POST /api/v1/scrape-job
///
/// Fetches a single posting and returns its text without saving it.
/// A missing scheme defaults to `https://`.
pub async fn handle_scrape_job(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ScrapeJobRequest>,
) -> Result<Json<ScrapeJobResponse>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    let url = normalize_scheme(&request.url);
    let text = state
        .fetcher
        .fetch_text(&url)
        .await
        .map_err(|e| AppError::Fetch(format!("Error downloading {url}: {e:#}")))?;

    Ok(Json(ScrapeJobResponse {
        success: true,
        text,
        url,
    }))
}

/// POST /api/v1/scrape/bulk
pub async fn handle_bulk_scrape(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BulkScrapeRequest>,
) -> Result<Json<FetchSummary>, AppError> {
    let urls: Vec<String> = request
        .urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect();

    run_bulk(&state, urls).await
}

/// POST /api/v1/scrape/bulk/upload
///
/// Multipart `urls` part: a `.txt` (one URL per line) or `.csv` (first column) file.
pub async fn handle_bulk_scrape_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FetchSummary>, AppError> {
    let mut uploads = read_text_uploads(multipart, URL_LIST_EXTENSIONS).await?;
    let list = require_upload(&mut uploads, "urls")?;
    let is_csv = list.extension().as_deref() == Some("csv");

    let urls = parse_url_list(&list.contents, is_csv)
        .map_err(|e| AppError::Validation(format!("Unreadable URL list: {e:#}")))?;

    run_bulk(&state, urls).await
}

/// GET /api/v1/scrape/files/:filename
///
/// Serves a text file previously written by a bulk scrape.
pub async fn handle_download_scraped(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !is_plain_filename(&filename) {
        return Err(AppError::Validation(format!("Invalid filename '{filename}'")));
    }

    let path = state.config.scrape_output_dir.join(&filename);
    let contents = match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("File {filename} not found")));
        }
        Err(e) => return Err(AppError::Io(e)),
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        contents,
    ))
}

async fn run_bulk(state: &AppState, urls: Vec<String>) -> Result<Json<FetchSummary>, AppError> {
    if urls.is_empty() {
        return Err(AppError::Validation("No URLs provided".to_string()));
    }

    let summary = state
        .fetcher
        .fetch_all(&urls, &state.config.scrape_output_dir)
        .await?;
    Ok(Json(summary))
}

/// A single path component made of filename-safe characters.
fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
