//! The normalizer's output type.
//!
//! ```rust
//! use canonical::normalize;
//!
//! let doc = normalize("Hello, World!  It's here.");
//! assert_eq!(doc.text, "hello world its here");
//! assert_eq!(doc.len(), 4);
//! assert_eq!(doc.tokens[1].text, "world");
//! assert_eq!(&doc.raw_text[doc.tokens[1].raw_span()], "World");
//! assert_eq!(doc.digest.len(), 64);
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// A raw text together with its comparable token stream.
///
/// Every field is derived deterministically from `raw_text` and the normalizer
/// version; normalizing the same input twice yields an identical value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedText {
    /// The untouched input.
    pub raw_text: String,
    /// Tokens joined by single ASCII spaces. Empty when there are no tokens.
    pub text: String,
    /// Tokens in order; `tokens[i].index == i`.
    pub tokens: Vec<Token>,
    /// Version-aware SHA-256 digest of `text`.
    pub digest: String,
    /// Normalizer version that produced this value.
    pub version: u32,
}

impl NormalizedText {
    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token texts in order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(|t| t.text.as_str())
    }

    /// The normalized phrase covering the token range, i.e. the tokens joined by
    /// single spaces. Returns `None` for an empty or out-of-bounds range.
    pub fn phrase(&self, range: Range<usize>) -> Option<&str> {
        if range.start >= range.end || range.end > self.tokens.len() {
            return None;
        }
        let start = self.tokens[range.start].start;
        let end = self.tokens[range.end - 1].end;
        self.text.get(start..end)
    }

    /// Index of the token containing the normalized-text byte `offset`.
    ///
    /// A separator space belongs to the token before it. Returns `None` when the
    /// text is empty or `offset` lies past its end.
    pub fn token_at_offset(&self, offset: usize) -> Option<usize> {
        if offset >= self.text.len() {
            return None;
        }
        let following = self.tokens.partition_point(|t| t.start <= offset);
        following.checked_sub(1)
    }
}
