pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::fetcher::handlers as scrape;
use crate::state::AppState;
use crate::tailoring::handlers as tailor;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Tailoring API
        .route("/api/v1/keywords", post(tailor::handle_extract_keywords))
        .route("/api/v1/tailor", post(tailor::handle_tailor))
        .route("/api/v1/tailor/upload", post(tailor::handle_tailor_upload))
        .route("/api/v1/tailor/pdf", post(tailor::handle_render_pdf))
        .route("/api/v1/skills/analyze", post(tailor::handle_analyze_skills))
        // Scrape API
        .route("/api/v1/scrape-job", post(scrape::handle_scrape_job))
        .route("/api/v1/scrape/bulk", post(scrape::handle_bulk_scrape))
        .route(
            "/api/v1/scrape/bulk/upload",
            post(scrape::handle_bulk_scrape_upload),
        )
        .route(
            "/api/v1/scrape/files/:filename",
            get(scrape::handle_download_scraped),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests;
