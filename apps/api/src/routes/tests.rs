//! HTTP endpoint tests using axum-test

use std::sync::Arc;

use async_trait::async_trait;
use axum::{http::StatusCode, response::Html, routing::get, Router};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use super::build_router;
use crate::config::{Config, FetchConfig};
use crate::fetcher::bulk::PageFetcher;
use crate::pdf_client::{PdfError, PdfRenderRequest, PdfRenderer};
use crate::state::AppState;

const RESUME: &str = "JANE DOE\n\nRust engineer shipping async services with Tokio.\n\nSkills:\nRust, Tokio, Postgres\n\nVolunteer baker";
const JOB: &str = "Senior Rust engineer. Rust, Tokio, Postgres. Async services in Rust.";

/// Renderer double: fixed filename, or a fixed failure message.
struct StubRenderer {
    failure: Option<String>,
}

#[async_trait]
impl PdfRenderer for StubRenderer {
    async fn render(&self, _request: &PdfRenderRequest) -> Result<String, PdfError> {
        match &self.failure {
            Some(msg) => Err(PdfError::Rejected(msg.clone())),
            None => Ok("123-tailored_resume.pdf".to_string()),
        }
    }

    fn download_url(&self, filename: &str) -> String {
        format!("http://pdf.test/download/{filename}")
    }
}

fn create_test_server(pdf_failure: Option<&str>) -> (TestServer, TempDir) {
    let out = tempfile::tempdir().unwrap();
    let fetch = FetchConfig {
        timeout_secs: 5,
        delay_ms: 0,
        ..FetchConfig::default()
    };
    let config = Config {
        port: 0,
        rust_log: "info".to_string(),
        scrape_output_dir: out.path().to_path_buf(),
        fetch: fetch.clone(),
        pdf_service_url: "http://pdf.test".to_string(),
        max_upload_bytes: 1024 * 1024,
    };
    let state = AppState {
        config,
        fetcher: PageFetcher::new(&fetch).unwrap(),
        pdf: Arc::new(StubRenderer {
            failure: pdf_failure.map(str::to_string),
        }),
    };

    (TestServer::new(build_router(state)).unwrap(), out)
}

async fn spawn_job_board() -> String {
    let app = Router::new().route(
        "/careers/rust",
        get(|| async { Html("<html><body><h1>Rust Engineer</h1><style>h1{}</style></body></html>") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_health_returns_200() {
    let (server, _out) = create_test_server(None);
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_keywords_ranked_by_frequency() {
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/keywords")
        .json(&json!({"job_description": JOB}))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["keywords"][0], "rust");
    assert_eq!(body["frequencies"][0]["frequency"], 3);
}

#[tokio::test]
async fn test_tailor_returns_all_renderings() {
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/tailor")
        .json(&json!({"resume_text": RESUME, "job_description": JOB}))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let sections = body["sections"].as_array().unwrap();
    assert!(!sections.is_empty());
    assert!(!body["text"].as_str().unwrap().contains("baker"));
    assert!(body["markdown"].as_str().unwrap().contains("### Skills"));
    assert_eq!(body["stats"]["budget"], 1500);
}

#[tokio::test]
async fn test_tailor_rejects_empty_resume() {
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/tailor")
        .json(&json!({"resume_text": "   ", "job_description": JOB}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_tailor_without_keywords_is_unprocessable() {
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/tailor")
        .json(&json!({"resume_text": RESUME, "job_description": "the and with"}))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_tailor_upload_accepts_text_files() {
    let (server, _out) = create_test_server(None);
    let form = MultipartForm::new()
        .add_part("resume", Part::text(RESUME).file_name("resume.txt"))
        .add_part("job_description", Part::text(JOB).file_name("job.txt"));

    let response = server.post("/api/v1/tailor/upload").multipart(form).await;
    response.assert_status_ok();
    assert!(response.json::<Value>()["sections"].as_array().unwrap().len() >= 1);
}

#[tokio::test]
async fn test_tailor_upload_rejects_wrong_file_type() {
    let (server, _out) = create_test_server(None);
    let form = MultipartForm::new()
        .add_part("resume", Part::text(RESUME).file_name("resume.pdf"))
        .add_part("job_description", Part::text(JOB).file_name("job.txt"));

    let response = server.post("/api/v1/tailor/upload").multipart(form).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Invalid file type"));
}

#[tokio::test]
async fn test_pdf_success_returns_download_url() {
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/tailor/pdf")
        .json(&json!({"markdown": "# JANE DOE"}))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(
        body["download_url"],
        "http://pdf.test/download/123-tailored_resume.pdf"
    );
}

#[tokio::test]
async fn test_pdf_failure_preserves_markdown() {
    let (server, _out) = create_test_server(Some("renderer offline"));
    let response = server
        .post("/api/v1/tailor/pdf")
        .json(&json!({"markdown": "# JANE DOE\n\nRust engineer"}))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);

    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "PDF_SERVICE_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("renderer offline"));
    assert_eq!(body["preserved_markdown"], "# JANE DOE\n\nRust engineer");
}

#[tokio::test]
async fn test_pdf_structured_requires_job_title() {
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/tailor/pdf")
        .json(&json!({
            "resume_data": {"name": "Jane Doe"},
            "job_title": "",
            "company_name": "Acme"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bulk_scrape_rejects_empty_list() {
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/scrape/bulk")
        .json(&json!({"urls": ["", "  "]}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bulk_scrape_then_download_file() {
    let board = spawn_job_board().await;
    let (server, _out) = create_test_server(None);

    let response = server
        .post("/api/v1/scrape/bulk")
        .json(&json!({"urls": [format!("{board}/careers/rust"), "nonsense"]}))
        .await;
    response.assert_status_ok();

    let summary = response.json::<Value>();
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["success"], 1);
    assert_eq!(summary["failed"], 1);

    let filename = summary["results"][0]["filename"].as_str().unwrap().to_string();
    let download = server
        .get(&format!("/api/v1/scrape/files/{filename}"))
        .await;
    download.assert_status_ok();
    assert!(download.text().contains("Rust Engineer"));
    assert!(!download.text().contains("h1{}"));
}

#[tokio::test]
async fn test_bulk_scrape_upload_csv() {
    let board = spawn_job_board().await;
    let (server, _out) = create_test_server(None);
    let csv = format!("url,company\n{board}/careers/rust,Acme\n");
    let form = MultipartForm::new().add_part("urls", Part::text(csv).file_name("urls.csv"));

    let response = server
        .post("/api/v1/scrape/bulk/upload")
        .multipart(form)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["success"], 1);
}

#[tokio::test]
async fn test_download_missing_file_is_404() {
    let (server, _out) = create_test_server(None);
    let response = server.get("/api/v1/scrape/files/nothing.txt").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_scrape_job_reports_fetch_failure() {
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/scrape-job")
        .json(&json!({"url": "http://127.0.0.1:1/closed"}))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["error"]["code"], "FETCH_ERROR");
}

#[tokio::test]
async fn test_scrape_job_returns_text() {
    let board = spawn_job_board().await;
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/scrape-job")
        .json(&json!({"url": format!("{board}/careers/rust")}))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["text"], "Rust Engineer");
}

#[tokio::test]
async fn test_bulk_scrape_upload_csv_keeps_quoted_commas() {
    let board = spawn_job_board().await;
    let (server, _out) = create_test_server(None);
    let csv = format!("url,company\n\"{board}/careers/rust?ids=1,2\",Acme\n");
    let form = MultipartForm::new().add_part("urls", Part::text(csv).file_name("urls.csv"));

    let response = server
        .post("/api/v1/scrape/bulk/upload")
        .multipart(form)
        .await;
    response.assert_status_ok();

    let summary = response.json::<Value>();
    assert_eq!(summary["success"], 1);
    assert_eq!(
        summary["results"][0]["url"],
        format!("{board}/careers/rust?ids=1,2")
    );
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/tailor")
        .text("{not json")
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_json_field_uses_error_envelope() {
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/scrape/bulk")
        .json(&json!({"links": []}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].as_str().unwrap().contains("urls"));
}

#[tokio::test]
async fn test_skills_analysis_from_resume_text() {
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/skills/analyze")
        .json(&json!({
            "resume_text": RESUME,
            "job_description": "Rust, Tokio, Postgres, AWS and Kubernetes"
        }))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["missing_skills"], json!(["AWS", "Kubernetes"]));
    assert_eq!(body["certifications"][0]["skill"], "AWS");
    assert_eq!(
        body["certifications"][0]["certifications"][0]["provider"],
        "Amazon"
    );
}

#[tokio::test]
async fn test_skills_analysis_with_explicit_skills() {
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/skills/analyze")
        .json(&json!({
            "resume_skills": ["aws"],
            "job_description": "AWS and Docker"
        }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["missing_skills"], json!(["Docker"]));
}

#[tokio::test]
async fn test_skills_analysis_requires_resume() {
    let (server, _out) = create_test_server(None);
    let response = server
        .post("/api/v1/skills/analyze")
        .json(&json!({"job_description": "Rust"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
