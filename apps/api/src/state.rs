use std::sync::Arc;

use crate::config::Config;
use crate::fetcher::bulk::PageFetcher;
use crate::pdf_client::PdfRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub fetcher: PageFetcher,
    /// Pluggable PDF backend. Default: HttpPdfRenderer pointed at PDF_SERVICE_URL.
    pub pdf: Arc<dyn PdfRenderer>,
}
