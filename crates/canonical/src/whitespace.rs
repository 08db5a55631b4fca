//! Whitespace normalization utilities.

/// Collapses runs of Unicode whitespace into single ASCII spaces and trims the
/// edges.
///
/// Useful for callers that want whitespace-normalized display text without
/// running the full normalizer.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  hello   world  "), "hello world");
/// assert_eq!(collapse_whitespace("hello\r\n\tworld"), "hello world");
/// assert_eq!(collapse_whitespace("hello\u{00A0}world"), "hello world");
/// assert_eq!(collapse_whitespace("   \n\t   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
