//! PDF client — the single point of entry for the external PDF-rendering service.
//!
//! The service owns all rendering. This module only speaks its wire format:
//! `POST /convert-resume` with `{markdown}` or `{resume_data, job_title, company_name}`,
//! answered by `{success, filename}` or `{success: false, error}`; generated files are
//! served from `GET /download/{filename}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::resume::ResumeData;

const CONVERT_PATH: &str = "/convert-resume";
const DOWNLOAD_PATH: &str = "/download";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("PDF service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("PDF service rejected the request: {0}")]
    Rejected(String),

    #[error("PDF service reported success without a filename")]
    MissingFilename,
}

/// What to render: raw Markdown, or a structured résumé targeted at a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PdfRenderRequest {
    Markdown {
        markdown: String,
    },
    Structured {
        resume_data: ResumeData,
        job_title: String,
        company_name: String,
    },
}

impl PdfRenderRequest {
    /// Text handed back to the caller if rendering fails.
    pub fn preserved_content(&self) -> String {
        match self {
            PdfRenderRequest::Markdown { markdown } => markdown.clone(),
            PdfRenderRequest::Structured { resume_data, .. } => {
                serde_json::to_string_pretty(resume_data).unwrap_or_default()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    success: bool,
    filename: Option<String>,
    error: Option<String>,
}

/// Renders résumés to PDF. Carried in `AppState` as `Arc<dyn PdfRenderer>`.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Requests a render and returns the generated filename.
    async fn render(&self, request: &PdfRenderRequest) -> Result<String, PdfError>;

    /// Where the caller can retrieve a generated file.
    fn download_url(&self, filename: &str) -> String;
}

/// `PdfRenderer` backed by the HTTP PDF service.
#[derive(Clone)]
pub struct HttpPdfRenderer {
    client: Client,
    base_url: String,
}

impl HttpPdfRenderer {
    pub fn new(base_url: &str) -> Result<Self, PdfError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PdfRenderer for HttpPdfRenderer {
    async fn render(&self, request: &PdfRenderRequest) -> Result<String, PdfError> {
        let url = format!("{}{CONVERT_PATH}", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // The service reports its own failures as {success: false, error} even on 4xx/5xx
        let parsed = serde_json::from_str::<ConvertResponse>(&body).ok();

        if !status.is_success() {
            warn!("PDF service returned {status}");
            let message = parsed.and_then(|p| p.error).unwrap_or(body);
            return Err(PdfError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = parsed.ok_or_else(|| PdfError::Api {
            status: status.as_u16(),
            message: format!("Unreadable response body: {body}"),
        })?;

        if !parsed.success {
            return Err(PdfError::Rejected(
                parsed.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        let filename = parsed.filename.ok_or(PdfError::MissingFilename)?;
        debug!("PDF rendered: {filename}");
        Ok(filename)
    }

    fn download_url(&self, filename: &str) -> String {
        format!("{}{DOWNLOAD_PATH}/{filename}", self.base_url)
    }
}
