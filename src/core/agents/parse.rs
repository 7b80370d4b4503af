//! Structural cleanup of raw LLM output before it is handed downstream.

/// Remove markdown code fences from LLM output, keeping the fenced content.
pub(crate) fn strip_code_fences(text: &str) -> String {
    let re = regex::Regex::new(r"(?m)^```[\w-]*[ \t]*$").unwrap();
    let cleaned = re.replace_all(text, "");
    cleaned.replace("```", "").trim().to_string()
}

/// Split cleaned SQL text into statements, one per line, dropping blanks.
pub(crate) fn split_statements(text: &str) -> Vec<String> {
    strip_code_fences(text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract a JSON block from LLM output. Tries fenced ```json ... ``` first,
/// then raw JSON starting with `{` or `[`.
pub(crate) fn extract_json_block(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if let Some(start) = trimmed.find("```json") {
        let content_start = start + 7;
        if let Some(end) = trimmed[content_start..].find("```") {
            let block = trimmed[content_start..content_start + end].trim();
            if !block.is_empty() {
                return Some(block);
            }
        }
    }
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Some(trimmed);
    }
    None
}
