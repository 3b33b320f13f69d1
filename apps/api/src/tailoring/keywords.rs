//! Job-description keywords: the most frequent salient words of a posting.
//!
//! Pure and synchronous. No stemming, no phrases: a keyword is a single lowercase
//! token that survives punctuation stripping, the length floor and the stop-word list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Upper bound on the number of keywords returned.
pub const MAX_KEYWORDS: usize = 15;

/// Tokens with this many characters or fewer are discarded.
const MAX_DISCARDED_LEN: usize = 3;

/// Deleted outright (not replaced by a space) before tokenizing.
const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "her", "was", "one",
    "our", "out", "with", "that", "this", "from", "have", "will", "your", "they", "their",
    "about", "which", "would", "there", "been", "were", "over", "into", "than", "more",
];

/// A keyword together with its occurrence count in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub frequency: u32,
}

/// Returns up to [`MAX_KEYWORDS`] keywords ordered by descending frequency.
pub fn extract_keywords(text: &str) -> Vec<String> {
    rank_keywords(text)
        .into_iter()
        .map(|entry| entry.keyword)
        .collect()
}

/// Same ranking as [`extract_keywords`], keeping the counts.
///
/// Algorithm:
/// 1. Lowercase and delete [`STRIPPED_PUNCTUATION`]
/// 2. Collapse whitespace runs of two or more into a single space
/// 3. Split on single spaces
/// 4. Drop short tokens and stop words
/// 5. Count, then stable-sort by count so ties keep first-seen order
pub fn rank_keywords(text: &str) -> Vec<KeywordCount> {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();
    let normalized = collapse_whitespace_runs(&stripped);

    let mut counts: Vec<(&str, u32)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for token in normalized.split(' ').filter(|t| is_candidate(t)) {
        match positions.get(token) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    // sort_by is stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(keyword, frequency)| KeywordCount {
            keyword: keyword.to_string(),
            frequency,
        })
        .collect()
}

fn is_candidate(token: &str) -> bool {
    token.chars().count() > MAX_DISCARDED_LEN && !STOP_WORDS.contains(&token)
}

/// Replaces every run of at least two whitespace characters with one space.
/// A lone whitespace character is left as-is.
fn collapse_whitespace_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();

    for c in text.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        flush_run(&mut out, &mut run);
        out.push(c);
    }
    flush_run(&mut out, &mut run);

    out
}

fn flush_run(out: &mut String, run: &mut String) {
    if run.chars().nth(1).is_some() {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}
