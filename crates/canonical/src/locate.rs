//! Locating normalized phrases back in raw text.

use std::ops::Range;

/// Find the first case-insensitive occurrence of `needle` in `haystack`.
///
/// `needle` must already be lowercase. The haystack is lowercased char by char
/// while keeping, for every lowered byte, the raw span of the char it came from,
/// so the returned range is always a valid byte range of `haystack` even when
/// lowercasing changes byte lengths. An empty needle never matches.
///
/// ```rust
/// use canonical::find_case_insensitive;
///
/// let raw = "See: The Quick brown fox";
/// let span = find_case_insensitive(raw, "quick brown").unwrap();
/// assert_eq!(&raw[span], "Quick brown");
/// assert!(find_case_insensitive(raw, "see the").is_none());
/// ```
pub fn find_case_insensitive(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() || haystack.is_empty() {
        return None;
    }

    let mut lowered = String::with_capacity(haystack.len());
    let mut raw_spans: Vec<(usize, usize)> = Vec::with_capacity(haystack.len());
    for (idx, ch) in haystack.char_indices() {
        let span = (idx, idx + ch.len_utf8());
        for lower in ch.to_lowercase() {
            lowered.push(lower);
            raw_spans.extend(std::iter::repeat(span).take(lower.len_utf8()));
        }
    }

    let pos = lowered.find(needle)?;
    let last = pos + needle.len() - 1;
    let (raw_start, _) = *raw_spans.get(pos)?;
    let (_, raw_end) = *raw_spans.get(last)?;
    Some(raw_start..raw_end)
}

/// Advance the byte offset `end` by up to `chars` characters, clamped to the
/// end of `text`. The result always lies on a char boundary.
///
/// ```rust
/// use canonical::extend_by_chars;
///
/// assert_eq!(extend_by_chars("abcdef", 2, 3), 5);
/// assert_eq!(extend_by_chars("abc", 1, 20), 3);
/// assert_eq!(extend_by_chars("aé b", 1, 1), 3);
/// ```
pub fn extend_by_chars(text: &str, end: usize, chars: usize) -> usize {
    let mut end = end.min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }
    text[end..]
        .char_indices()
        .nth(chars)
        .map(|(offset, _)| end + offset)
        .unwrap_or(text.len())
}
