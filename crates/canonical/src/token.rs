use serde::{Deserialize, Serialize};

/// A normalized word and where it came from.
///
/// `start`/`end` are UTF-8 byte offsets into the normalized text; `raw_start`/
/// `raw_end` are byte offsets into the raw input the token was derived from.
/// All four always lie on char boundaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The normalized token text.
    pub text: String,
    /// Position of this token in the token sequence.
    pub index: usize,
    /// Byte offset (inclusive) in the normalized text.
    pub start: usize,
    /// Byte offset (exclusive) in the normalized text.
    pub end: usize,
    /// Byte offset (inclusive) in the raw text.
    pub raw_start: usize,
    /// Byte offset (exclusive) in the raw text.
    pub raw_end: usize,
}

impl Token {
    /// Span of the token in the raw text.
    pub fn raw_span(&self) -> std::ops::Range<usize> {
        self.raw_start..self.raw_end
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}
