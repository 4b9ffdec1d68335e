use serde_json::{json, Value};

/// Build an Atlassian Document Format (ADF) document from plain text.
///
/// Blank lines separate paragraphs; single newlines inside a paragraph become
/// hard breaks. Returns `None` for text with no visible content, since Jira
/// rejects an empty document.
pub fn text_to_adf(text: &str) -> Option<Value> {
    let text = text.replace("\r\n", "\n");
    let paragraphs: Vec<Value> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(paragraph)
        .collect();

    if paragraphs.is_empty() {
        return None;
    }

    Some(json!({
        "type": "doc",
        "version": 1,
        "content": paragraphs,
    }))
}

fn paragraph(text: &str) -> Value {
    let mut content = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            content.push(json!({ "type": "hardBreak" }));
        }
        if !line.is_empty() {
            content.push(json!({ "type": "text", "text": line }));
        }
    }
    json!({ "type": "paragraph", "content": content })
}
