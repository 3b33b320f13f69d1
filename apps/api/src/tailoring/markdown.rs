//! Plain-text and Markdown renderings of a selected section list.

const SECTION_SEPARATOR: &str = "\n\n";
const SUBHEADING_BREAK: &str = ":\n";

/// Joins sections with a blank line.
pub fn to_plain_text(sections: &[String]) -> String {
    sections.join(SECTION_SEPARATOR)
}

/// Converts sections to Markdown.
///
/// Per section:
/// - all-uppercase → `# ` heading for the first section, `## ` for the rest
/// - contains `":\n"` → `### ` heading from the text before it, body after
/// - anything else passes through, so `- ` lines stay list items
pub fn to_markdown(sections: &[String]) -> String {
    sections
        .iter()
        .enumerate()
        .map(|(idx, section)| render_section(idx, section))
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

fn render_section(idx: usize, section: &str) -> String {
    if is_heading(section) {
        let level = if idx == 0 { "#" } else { "##" };
        return format!("{level} {}", section.trim());
    }

    if let Some((title, body)) = section.split_once(SUBHEADING_BREAK) {
        return format!("### {}\n\n{}", title.trim(), body);
    }

    section.to_string()
}

/// All-caps heuristic. Short acronym paragraphs ("AWS GCP") also qualify.
fn is_heading(section: &str) -> bool {
    let trimmed = section.trim();
    !trimmed.is_empty() && trimmed == trimmed.to_uppercase()
}
