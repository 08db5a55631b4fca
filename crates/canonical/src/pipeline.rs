use std::borrow::Cow;

use unicode_normalization::{is_nfkc, UnicodeNormalization};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::NormalizeConfig;
use crate::hash::hash_normalized_bytes;
use crate::text::NormalizedText;
use crate::token::Token;

/// Normalize `input` with the default configuration.
pub fn normalize(input: &str) -> NormalizedText {
    normalize_with(input, &NormalizeConfig::default())
}

/// Main entry point. Lowercases, drops every character that is neither
/// alphanumeric nor whitespace, collapses whitespace runs and trims.
///
/// Total over all input: empty, whitespace-only and punctuation-only strings
/// produce an empty token stream. The configuration is not validated here;
/// callers that accept user configuration should run
/// [`NormalizeConfig::validate`] once up front.
pub fn normalize_with(input: &str, cfg: &NormalizeConfig) -> NormalizedText {
    let mut state = TokenState::with_capacity(input.len(), cfg.normalize_unicode);

    // Work per grapheme so NFKC sees combining sequences whole and each output
    // char can be traced back to a raw byte span.
    for (raw_start, grapheme) in input.grapheme_indices(true) {
        let raw_end = raw_start + grapheme.len();
        let composed: Cow<str> = if cfg.normalize_unicode {
            Cow::Owned(grapheme.nfkc().collect::<String>())
        } else {
            Cow::Borrowed(grapheme)
        };

        // Lowercasing can expand a single character into several.
        for ch in composed.chars() {
            for lower in ch.to_lowercase() {
                state.dispatch(lower, raw_start, raw_end);
            }
        }
    }

    let (text, tokens) = state.finish();
    let digest = hash_normalized_bytes(cfg.version, text.as_bytes());

    NormalizedText {
        raw_text: input.to_string(),
        text,
        tokens,
        digest,
        version: cfg.version,
    }
}

struct OpenToken {
    start: usize,
    raw_start: usize,
    raw_end: usize,
}

/// Tokenizer and whitespace collapser in one pass.
struct TokenState {
    text: String,
    tokens: Vec<Token>,
    pending_space: bool,
    current: Option<OpenToken>,
    recompose: bool,
}

impl TokenState {
    fn with_capacity(len: usize, recompose: bool) -> Self {
        Self {
            text: String::with_capacity(len),
            tokens: Vec::with_capacity((len / 5).saturating_add(1)),
            pending_space: false,
            current: None,
            recompose,
        }
    }

    fn dispatch(&mut self, ch: char, raw_start: usize, raw_end: usize) {
        if ch.is_whitespace() {
            self.finalize_token();
            if !self.text.is_empty() {
                self.pending_space = true;
            }
        } else if ch.is_alphanumeric() {
            self.append_char(ch, raw_start, raw_end);
        }
        // Anything else is dropped outright and does not split the token.
    }

    fn append_char(&mut self, ch: char, raw_start: usize, raw_end: usize) {
        if self.pending_space {
            self.text.push(' ');
            self.pending_space = false;
        }
        match self.current.as_mut() {
            Some(open) => open.raw_end = raw_end,
            None => {
                self.current = Some(OpenToken {
                    start: self.text.len(),
                    raw_start,
                    raw_end,
                })
            }
        }
        self.text.push(ch);
    }

    fn finalize_token(&mut self) {
        if let Some(open) = self.current.take() {
            if self.recompose {
                self.recompose_tail(open.start);
            }
            let end = self.text.len();
            if open.start < end {
                self.tokens.push(Token {
                    text: self.text[open.start..end].to_string(),
                    index: self.tokens.len(),
                    start: open.start,
                    end,
                    raw_start: open.raw_start,
                    raw_end: open.raw_end,
                });
            }
        }
    }

    /// Dropping a character can leave two composable chars side by side
    /// (`"\u{1100}.\u{1161}"`), so the finished token is normalized again.
    fn recompose_tail(&mut self, start: usize) {
        let tail = &self.text[start..];
        if is_nfkc(tail) {
            return;
        }
        let recomposed: String = tail
            .nfkc()
            .flat_map(char::to_lowercase)
            .filter(|ch| ch.is_alphanumeric())
            .collect();
        if !recomposed.is_empty() {
            self.text.truncate(start);
            self.text.push_str(&recomposed);
        }
    }

    fn finish(mut self) -> (String, Vec<Token>) {
        self.finalize_token();
        (self.text, self.tokens)
    }
}
