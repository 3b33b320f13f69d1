// Résumé tailoring: keyword extraction, section selection, text/Markdown rendering,
// and the dictionary-based skills gap.
// Everything except the handlers is pure and synchronous.

pub mod handlers;
pub mod keywords;
pub mod markdown;
pub mod pipeline;
pub mod selector;
pub mod skills;
