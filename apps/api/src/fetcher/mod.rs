// Job-posting scraper: single-URL fetch, bulk fetch to disk, HTML text extraction.
// All outbound HTTP for postings goes through bulk::PageFetcher.

pub mod bulk;
pub mod extract;
pub mod handlers;
pub mod naming;
