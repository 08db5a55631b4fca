//! Plagscan normalizer.
//!
//! Turns raw text into a comparable word stream for phrase-overlap detection.
//! Downstream matching compares only normalized words, while excerpts shown to
//! users are cut from the raw text, so every token keeps its raw byte offsets.
//!
//! ## What we do
//!
//! - Unicode normalization (NFKC per grapheme cluster, configurable)
//! - Locale-free lowercasing
//! - Dropping everything that is neither alphanumeric nor whitespace
//! - Collapsing whitespace runs to single spaces, trimming the edges
//! - Tokenizing with offsets into both the normalized and the raw text
//! - A version-aware identity digest of the normalized text
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence, and no failure mode: any
//! string, including the empty string, normalizes to a valid (possibly empty)
//! token stream.
//!
//! ```rust
//! use canonical::normalize;
//!
//! let doc = normalize("  The QUICK, brown fox!  ");
//! assert_eq!(doc.text, "the quick brown fox");
//! assert_eq!(doc.words().collect::<Vec<_>>(), ["the", "quick", "brown", "fox"]);
//! ```

mod config;
mod error;
mod hash;
mod locate;
mod pipeline;
mod text;
mod token;
mod whitespace;

pub use crate::config::NormalizeConfig;
pub use crate::error::CanonicalError;
pub use crate::hash::{hash_normalized_bytes, hash_text};
pub use crate::locate::{extend_by_chars, find_case_insensitive};
pub use crate::pipeline::{normalize, normalize_with};
pub use crate::text::NormalizedText;
pub use crate::token::Token;
pub use crate::whitespace::collapse_whitespace;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalize_default() {
        let input = "  HAcllo\nWORLD!  This is   Plagscan. ";
        let out = normalize(input);

        assert_eq!(out.text, "hacllo world this is plagscan");
        assert_eq!(out.raw_text, input);
        assert_eq!(out.version, 1);

        let expected = vec![
            ("hacllo", 0usize, 6usize, "HAcllo"),
            ("world", 7, 12, "WORLD"),
            ("this", 13, 17, "This"),
            ("is", 18, 20, "is"),
            ("plagscan", 21, 29, "Plagscan"),
        ];
        assert_eq!(out.tokens.len(), expected.len());
        for (i, (token, (text, start, end, raw))) in
            out.tokens.iter().zip(expected.into_iter()).enumerate()
        {
            assert_eq!(token.text, text);
            assert_eq!(token.index, i);
            assert_eq!(token.start, start);
            assert_eq!(token.end, end);
            assert_eq!(&input[token.raw_span()], raw);
        }

        assert_eq!(out.digest, hash_normalized_bytes(1, out.text.as_bytes()));
    }

    #[test]
    fn punctuation_is_dropped_not_split() {
        let out = normalize("Hello, world! It's 100% fun... e-mail");
        assert_eq!(out.text, "hello world its 100 fun email");
        let raw_spans: Vec<&str> = out
            .tokens
            .iter()
            .map(|t| &out.raw_text[t.raw_span()])
            .collect();
        assert_eq!(raw_spans, ["Hello", "world", "It's", "100", "fun", "e-mail"]);
    }

    #[test]
    fn empty_and_punctuation_only_inputs_are_total() {
        for input in ["", "   ", "\n\t", "!!! ... ---", "¿¡«»"] {
            let out = normalize(input);
            assert!(out.is_empty(), "expected no tokens for {input:?}");
            assert_eq!(out.text, "");
            assert_eq!(out.digest.len(), 64);
        }
    }

    #[test]
    fn unicode_equivalence_nfkc() {
        let composed = normalize("Caf\u{00E9} noir");
        let decomposed = normalize("Cafe\u{0301} noir");

        assert_eq!(composed.text, "caf\u{00E9} noir");
        assert_eq!(composed.text, decomposed.text);
        assert_eq!(composed.digest, decomposed.digest);
    }

    #[test]
    fn disable_unicode_normalization_drops_combining_marks() {
        let cfg = NormalizeConfig {
            normalize_unicode: false,
            ..Default::default()
        };
        let out = normalize_with("Cafe\u{0301}", &cfg);
        assert_eq!(out.text, "cafe");
    }

    #[test]
    fn raw_offsets_stable_for_non_bmp_and_expanding_lowercase() {
        let input = " a\u{10348}b  \u{0130}stanbul ";
        let out = normalize(input);

        assert_eq!(out.tokens.len(), 2);
        assert_eq!(out.tokens[0].text, "a\u{10348}b");
        assert_eq!(&input[out.tokens[0].raw_span()], "a\u{10348}b");
        assert_eq!(&input[out.tokens[1].raw_span()], "\u{0130}stanbul");
        assert!(out.tokens[1].text.ends_with("stanbul"));
    }

    #[test]
    fn renormalizing_is_idempotent() {
        let inputs = [
            "The Quick, brown FOX -- jumped!",
            "  Ünïcödé   téxt\twith\u{00A0}spaces ",
            "ﬁne ligatures and 42 numbers",
            "\u{1100}.\u{1161} abc",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once.text);
            assert_eq!(once.text, twice.text);
            assert_eq!(
                once.words().collect::<Vec<_>>(),
                twice.words().collect::<Vec<_>>()
            );
            assert_eq!(once.digest, twice.digest);
        }
    }

    #[test]
    fn jamo_split_by_punctuation_recomposes() {
        let doc = normalize("\u{1100}.\u{1161} abc");
        assert_eq!(doc.words().collect::<Vec<_>>(), vec!["\u{AC00}", "abc"]);
        assert_eq!(doc.tokens[0].raw_span(), 0.."\u{1100}.\u{1161}".len());
        assert_eq!(doc.tokens[1].start, "\u{AC00} ".len());
    }

    #[test]
    fn phrase_and_offset_lookup() {
        let doc = normalize("one two three four");
        assert_eq!(doc.phrase(1..3), Some("two three"));
        assert_eq!(doc.phrase(0..4), Some("one two three four"));
        assert_eq!(doc.phrase(2..2), None);
        assert_eq!(doc.phrase(3..5), None);

        assert_eq!(doc.token_at_offset(0), Some(0));
        assert_eq!(doc.token_at_offset(3), Some(0));
        assert_eq!(doc.token_at_offset(4), Some(1));
        assert_eq!(doc.token_at_offset(9), Some(2));
        assert_eq!(doc.token_at_offset(doc.text.len()), None);
        assert_eq!(normalize("").token_at_offset(0), None);
    }

    #[test]
    fn case_insensitive_lookup_maps_to_raw_bytes() {
        let raw = "\u{0130}ST \u{00C9}t\u{00C9} Fin";
        let span = find_case_insensitive(raw, "\u{00E9}t\u{00E9} fin").expect("found");
        assert_eq!(&raw[span], "\u{00C9}t\u{00C9} Fin");

        assert!(find_case_insensitive(raw, "").is_none());
        assert!(find_case_insensitive("", "x").is_none());
        assert!(find_case_insensitive(raw, "absent").is_none());
    }

    #[test]
    fn extend_by_chars_clamps_and_respects_boundaries() {
        let text = "héllo wörld";
        assert_eq!(extend_by_chars(text, 0, 2), "hé".len());
        assert_eq!(extend_by_chars(text, 2, 1), "hél".len());
        assert_eq!(extend_by_chars(text, text.len(), 20), text.len());
        assert_eq!(extend_by_chars(text, 500, 1), text.len());
    }

    #[test]
    fn hash_text_determinism() {
        for text in ["", "hello world", "こんにちは世界", "emoji \u{1f600}"] {
            assert_eq!(hash_text(text), hash_text(text));
        }
    }

    #[test]
    fn digest_includes_version() {
        let v1 = NormalizeConfig::default();
        let v2 = NormalizeConfig {
            version: v1.version + 1,
            ..NormalizeConfig::default()
        };

        let doc_v1 = normalize_with("Same text", &v1);
        let doc_v2 = normalize_with("Same text", &v2);

        assert_eq!(doc_v1.text, doc_v2.text);
        assert_ne!(doc_v1.digest, doc_v2.digest);
    }

    #[test]
    fn invalid_config_version_rejected() {
        let cfg = NormalizeConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(CanonicalError::InvalidConfig(_))
        ));
    }

    #[test]
    fn normalized_text_serializes() {
        let doc = normalize("Serde round trip");
        let json = serde_json::to_string(&doc).expect("serialize");
        let back: NormalizedText = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(doc, back);
    }
}
