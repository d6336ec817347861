//! Comparison keys for search: lowercase ASCII alphanumerics only.

/// Lowercase `s`, then drop every character that is not an ASCII letter or digit.
///
/// Whitespace, punctuation and non-ASCII letters are all removed, so
/// `"GPT-4o Mini"` becomes `"gpt4omini"`.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Split a raw query into normalized tokens.
///
/// Pieces that normalize to the empty string (e.g. `"-"`) are dropped, so an
/// empty or punctuation-only query yields no tokens.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect()
}
