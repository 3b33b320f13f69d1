//! Ranks résumé sections by keyword overlap and truncates them to a character budget.
//!
//! No LLM, no state. Sections are the blank-line separated paragraphs of the résumé,
//! treated as opaque text.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Maximum characters of selected text, separators included.
pub const CHARACTER_BUDGET: usize = 1500;

/// Characters charged for the blank line between two accepted sections.
const SEPARATOR_COST: usize = 2;

const SECTION_SEPARATOR: &str = "\n\n";

/// A résumé section with its keyword score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredSection {
    pub text: String,
    pub score: usize,
}

/// Outcome of selection, in acceptance (score) order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResult {
    pub selected: Vec<ScoredSection>,
    /// Sections that matched a keyword but did not fit the budget.
    pub dropped: usize,
    /// Sections without any keyword match.
    pub unmatched: usize,
    /// Σ selected lengths + separator budget.
    pub used_chars: usize,
}

impl SelectionResult {
    pub fn texts(&self) -> Vec<String> {
        self.selected.iter().map(|s| s.text.clone()).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Selection algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Selects the sections of `resume` most relevant to `keywords`.
///
/// Output is ordered by score, not by position in the résumé.
pub fn select_sections(resume: &str, keywords: &[String]) -> Vec<String> {
    select_with_details(resume, keywords).texts()
}

/// Full selection pipeline:
/// 1. Split on blank lines (no trimming)
/// 2. Keep sections containing any keyword, case-insensitively
/// 3. Score each by summed keyword occurrence counts
/// 4. Stable sort descending by score
/// 5. Accept greedily until the next section would overrun [`CHARACTER_BUDGET`];
///    the first candidate is always accepted
pub fn select_with_details(resume: &str, keywords: &[String]) -> SelectionResult {
    let needles: Vec<String> = keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| k.to_lowercase())
        .collect();

    let sections = split_sections(resume);
    let total = sections.len();
    let ranked = rank_sections(&sections, &needles);
    let unmatched = total - ranked.len();

    let (selected, used_chars) = apply_budget(&ranked);
    let dropped = ranked.len() - selected.len();

    SelectionResult {
        selected,
        dropped,
        unmatched,
        used_chars,
    }
}

/// Splits a résumé into raw sections on the two-newline boundary.
pub fn split_sections(resume: &str) -> Vec<&str> {
    resume.split(SECTION_SEPARATOR).collect()
}

/// Counts case-insensitive, non-overlapping occurrences of each needle and sums them.
/// Needles must already be lowercase.
pub fn score_section(section: &str, needles: &[String]) -> usize {
    let haystack = section.to_lowercase();
    needles
        .iter()
        .map(|needle| haystack.matches(needle.as_str()).count())
        .sum()
}

fn rank_sections(sections: &[&str], needles: &[String]) -> Vec<ScoredSection> {
    let mut ranked: Vec<ScoredSection> = sections
        .iter()
        .map(|section| ScoredSection {
            text: section.to_string(),
            score: score_section(section, needles),
        })
        // A non-zero score is exactly "contains at least one keyword"
        .filter(|scored| scored.score > 0)
        .collect();

    // Stable: ties keep document order
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

fn apply_budget(ranked: &[ScoredSection]) -> (Vec<ScoredSection>, usize) {
    let mut selected: Vec<ScoredSection> = Vec::new();
    let mut running = 0usize;

    for candidate in ranked {
        let len = candidate.text.chars().count();
        if !selected.is_empty() && running + len > CHARACTER_BUDGET {
            break;
        }
        selected.push(candidate.clone());
        running += len + SEPARATOR_COST;
    }

    // The trailing separator is never emitted
    let used_chars = running.saturating_sub(SEPARATOR_COST);
    (selected, used_chars)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
