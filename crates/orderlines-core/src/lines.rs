//! Raw text to line sequence.

/// Split document text into trimmed, non-empty lines.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
