//! HTML → visible text.

use scraper::Html;

/// Elements whose contents never count as visible text.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Extracts the visible text of an HTML document.
///
/// Every text node outside `<script>`/`<style>` is trimmed; non-empty ones are
/// joined with newlines. Comments and doctype are not text nodes and drop out.
pub fn extract_visible_text(html: &str) -> String {
    let doc = Html::parse_document(html);

    doc.root_element()
        .descendants()
        .filter_map(|node| node.value().as_text().map(|text| (node, text)))
        .filter(|(node, _)| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
            })
        })
        .map(|(_, text)| text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_and_style_contents_are_removed() {
        let html = r#"<html><head><title>Rust Engineer</title>
            <style>body { color: red; }</style>
            <script>var tracking = "secret";</script></head>
            <body><h1>Senior Rust Engineer</h1>
            <script type="application/ld+json">{"@type": "JobPosting"}</script>
            <p>Build   distributed systems.</p></body></html>"#;

        let text = extract_visible_text(html);
        assert_eq!(
            text,
            "Rust Engineer\nSenior Rust Engineer\nBuild   distributed systems."
        );
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color"));
        assert!(!text.contains("JobPosting"));
    }

    #[test]
    fn test_nested_inline_elements_are_separate_lines() {
        let text = extract_visible_text("<p>Requirements: <b>Rust</b>, <i>Tokio</i></p>");
        assert_eq!(text, "Requirements:\nRust\n,\nTokio");
    }

    #[test]
    fn test_comments_are_not_text() {
        let text = extract_visible_text("<body><!-- hidden --><p>shown</p></body>");
        assert_eq!(text, "shown");
    }

    #[test]
    fn test_plain_text_body_survives() {
        assert_eq!(extract_visible_text("just text"), "just text");
    }
}
