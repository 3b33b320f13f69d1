//! End-to-end tailoring: job description → keywords → selected sections → renderings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tailoring::keywords::{rank_keywords, KeywordCount};
use crate::tailoring::markdown::{to_markdown, to_plain_text};
use crate::tailoring::selector::{select_with_details, CHARACTER_BUDGET};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TailorError {
    #[error("The job description contains no usable keywords")]
    NoKeywords,

    #[error("No résumé section mentions any of the job keywords")]
    NoMatchingSections,
}

/// Selection bookkeeping surfaced to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailorStats {
    pub selected: usize,
    pub dropped: usize,
    pub unmatched: usize,
    pub used_chars: usize,
    pub budget: usize,
}

/// A tailored résumé in every output form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredResume {
    pub keywords: Vec<KeywordCount>,
    /// Selected sections, highest score first.
    pub sections: Vec<String>,
    pub text: String,
    pub markdown: String,
    pub stats: TailorStats,
}

/// Runs the whole pipeline. All-or-nothing: an empty keyword list or an empty
/// selection is an error rather than an empty résumé.
pub fn tailor_resume(resume_text: &str, job_description: &str) -> Result<TailoredResume, TailorError> {
    let keywords = rank_keywords(job_description);
    if keywords.is_empty() {
        return Err(TailorError::NoKeywords);
    }

    let words: Vec<String> = keywords.iter().map(|k| k.keyword.clone()).collect();
    let selection = select_with_details(resume_text, &words);
    if selection.selected.is_empty() {
        return Err(TailorError::NoMatchingSections);
    }

    let sections = selection.texts();
    Ok(TailoredResume {
        text: to_plain_text(&sections),
        markdown: to_markdown(&sections),
        stats: TailorStats {
            selected: selection.selected.len(),
            dropped: selection.dropped,
            unmatched: selection.unmatched,
            used_chars: selection.used_chars,
            budget: CHARACTER_BUDGET,
        },
        keywords,
        sections,
    })
}
