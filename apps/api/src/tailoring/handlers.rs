//! Axum route handlers for the Tailoring API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{ApiJson, AppError};
use crate::pdf_client::PdfRenderRequest;
use crate::state::AppState;
use crate::tailoring::keywords::{rank_keywords, KeywordCount};
use crate::tailoring::pipeline::{tailor_resume, TailorError, TailoredResume};
use crate::tailoring::skills::{analyze_resume_text, analyze_skills, SkillsAnalysis};
use crate::uploads::{read_text_uploads, require_upload};

/// Accepted extensions for uploaded résumé / job description files.
const TEXT_EXTENSIONS: &[&str] = &["txt", "md"];

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
    pub frequencies: Vec<KeywordCount>,
}

#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// Résumé skills come from `resume_skills` when given, otherwise from `resume_text`.
#[derive(Debug, Deserialize)]
pub struct SkillsRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub resume_skills: Vec<String>,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct PdfResponse {
    pub success: bool,
    pub filename: String,
    pub download_url: String,
}

impl From<TailorError> for AppError {
    fn from(e: TailorError) -> Self {
        AppError::UnprocessableEntity(e.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/keywords
///
/// Returns the ranked keywords of a job description.
pub async fn handle_extract_keywords(
    ApiJson(request): ApiJson<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let frequencies = rank_keywords(&request.job_description);
    let keywords = frequencies.iter().map(|k| k.keyword.clone()).collect();

    Ok(Json(KeywordsResponse {
        keywords,
        frequencies,
    }))
}

/// POST /api/v1/tailor
///
/// Tailors pasted résumé text to a pasted job description.
pub async fn handle_tailor(
    ApiJson(request): ApiJson<TailorRequest>,
) -> Result<Json<TailoredResume>, AppError> {
    validate_inputs(&request.resume_text, &request.job_description)?;
    let tailored = tailor_resume(&request.resume_text, &request.job_description)?;
    log_tailored(&tailored);
    Ok(Json(tailored))
}

/// POST /api/v1/skills/analyze
///
/// Dictionary skills the posting asks for, the ones the résumé lacks, and
/// certifications for those.
pub async fn handle_analyze_skills(
    ApiJson(request): ApiJson<SkillsRequest>,
) -> Result<Json<SkillsAnalysis>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let resume_skills: Vec<String> = request
        .resume_skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let analysis = if !resume_skills.is_empty() {
        analyze_skills(&resume_skills, &request.job_description)
    } else if !request.resume_text.trim().is_empty() {
        analyze_resume_text(&request.resume_text, &request.job_description)
    } else {
        return Err(AppError::Validation(
            "resume_text or resume_skills is required".to_string(),
        ));
    };

    info!(
        "Skills analysis: {} required, {} missing, {} with certifications",
        analysis.job_skills.len(),
        analysis.missing_skills.len(),
        analysis.certifications.len()
    );
    Ok(Json(analysis))
}

/// POST /api/v1/tailor/upload
///
/// Multipart variant: `resume` and `job_description` as `.txt`/`.md` files or text fields.
pub async fn handle_tailor_upload(multipart: Multipart) -> Result<Json<TailoredResume>, AppError> {
    let mut uploads = read_text_uploads(multipart, TEXT_EXTENSIONS).await?;
    let resume = require_upload(&mut uploads, "resume")?;
    let job = require_upload(&mut uploads, "job_description")?;

    let tailored = tailor_resume(&resume.contents, &job.contents)?;
    log_tailored(&tailored);
    Ok(Json(tailored))
}

/// POST /api/v1/tailor/pdf
///
/// Forwards Markdown or a structured résumé to the PDF service. On failure the
/// submitted content comes back in the error body.
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PdfRenderRequest>,
) -> Result<Json<PdfResponse>, AppError> {
    validate_pdf_request(&request)?;

    let filename = state
        .pdf
        .render(&request)
        .await
        .map_err(|e| AppError::PdfService {
            message: e.to_string(),
            preserved: request.preserved_content(),
        })?;

    info!("PDF generated: {filename}");
    let download_url = state.pdf.download_url(&filename);

    Ok(Json(PdfResponse {
        success: true,
        filename,
        download_url,
    }))
}

fn validate_inputs(resume_text: &str, job_description: &str) -> Result<(), AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_pdf_request(request: &PdfRenderRequest) -> Result<(), AppError> {
    match request {
        PdfRenderRequest::Markdown { markdown } if markdown.trim().is_empty() => Err(
            AppError::Validation("markdown cannot be empty".to_string()),
        ),
        PdfRenderRequest::Structured {
            resume_data,
            job_title,
            company_name,
        } => {
            if resume_data.is_empty() {
                return Err(AppError::Validation("resume_data cannot be empty".to_string()));
            }
            if job_title.trim().is_empty() || company_name.trim().is_empty() {
                return Err(AppError::Validation(
                    "job_title and company_name are required".to_string(),
                ));
            }
            Ok(())
        }
        PdfRenderRequest::Markdown { .. } => Ok(()),
    }
}

fn log_tailored(tailored: &TailoredResume) {
    info!(
        "Tailored résumé: {} keywords, {} sections selected, {} dropped, {}/{} chars",
        tailored.keywords.len(),
        tailored.stats.selected,
        tailored.stats.dropped,
        tailored.stats.used_chars,
        tailored.stats.budget
    );
}
