//! Longest-first phrase overlap search.
//!
//! For every window size from `min(max_window, |O|)` down to `min_window`, and
//! every start index in ascending order, the window's phrase is looked up as a
//! literal substring of the normalized source. A hit is greedily extended word
//! by word, scored against the original's length, and, when it clears the
//! similarity floor, claims its token span so no later (shorter) window can
//! count the same words again.
//!
//! The traversal order is the tie-break: longer windows win over shorter ones
//! and, within a window size, earlier starts win over later ones.

use canonical::{extend_by_chars, find_case_insensitive, normalize, NormalizedText};

use crate::score::clamp_percent;
use crate::types::{Comparison, CoveredRange, Match, PhraseConfig};

/// Compare two raw texts with the default configuration.
pub fn find_all_similarities(original: &str, source: &str) -> Comparison {
    find_all_similarities_with(original, source, &PhraseConfig::default())
}

/// Compare two raw texts with an explicit phrase configuration.
pub fn find_all_similarities_with(original: &str, source: &str, cfg: &PhraseConfig) -> Comparison {
    compare_normalized(&normalize(original), &normalize(source), cfg)
}

/// Compare two already-normalized texts.
///
/// Total and side-effect free: empty inputs, or originals shorter than the
/// smallest window, yield an empty comparison.
pub fn compare_normalized(
    original: &NormalizedText,
    source: &NormalizedText,
    cfg: &PhraseConfig,
) -> Comparison {
    let total = original.len();
    if total == 0 || source.is_empty() || cfg.min_window == 0 {
        return Comparison::empty();
    }
    let max_window = cfg.max_window.min(total);
    if max_window < cfg.min_window {
        return Comparison::empty();
    }

    let mut covered: Vec<CoveredRange> = Vec::new();
    let mut matches: Vec<Match> = Vec::new();

    for window in (cfg.min_window..=max_window).rev() {
        for start in 0..=(total - window) {
            let candidate = CoveredRange::new(start, start + window - 1);
            if covered.iter().any(|range| range.overlaps(&candidate)) {
                continue;
            }

            let Some(phrase) = original.phrase(start..start + window) else {
                continue;
            };
            let Some(source_index) = source.text.find(phrase) else {
                continue;
            };
            let Some(source_token) = source.token_at_offset(source_index) else {
                continue;
            };

            // Extension must stop short of the next claimed span.
            let limit = covered
                .iter()
                .filter(|range| range.start > candidate.end)
                .map(|range| range.start)
                .min()
                .unwrap_or(total);
            let length = window
                + extension_len(original, source, candidate.end + 1, source_token + window, limit);

            let similarity = clamp_percent(length as f64 / total as f64 * 100.0);
            if similarity <= cfg.min_match_similarity {
                continue;
            }

            let range = CoveredRange::new(start, start + length - 1);
            let (matched_text, original_index) = recover_excerpt(original, range, cfg.context_chars);
            matches.push(Match {
                similarity,
                matched_text,
                original_index,
                source_index,
                range,
            });
            covered.push(range);
        }
    }

    let covered_tokens: usize = covered.iter().map(CoveredRange::len).sum();
    let overall_similarity = clamp_percent(covered_tokens as f64 / total as f64 * 100.0);

    matches.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then(a.range.start.cmp(&b.range.start))
    });

    Comparison {
        overall_similarity,
        matches,
    }
}

/// Count how many further tokens agree pairwise, starting at original token
/// `orig_next` and source token `src_next`, without reaching `orig_limit`.
fn extension_len(
    original: &NormalizedText,
    source: &NormalizedText,
    orig_next: usize,
    src_next: usize,
    orig_limit: usize,
) -> usize {
    let orig_end = orig_limit.min(original.tokens.len());
    let orig_tail = original.tokens.get(orig_next..orig_end).unwrap_or_default();
    let src_tail = source.tokens.get(src_next..).unwrap_or_default();

    orig_tail
        .iter()
        .zip(src_tail)
        .take_while(|(o, s)| o.text == s.text)
        .count()
}

/// Cut the case-preserved excerpt for `range` out of the raw original.
///
/// The phrase is searched case-insensitively and its first occurrence wins,
/// followed by `context_chars` of trailing context. When punctuation or other
/// dropped characters keep the phrase from appearing verbatim, the normalized
/// phrase is returned together with the raw offset of its first token.
fn recover_excerpt(
    original: &NormalizedText,
    range: CoveredRange,
    context_chars: usize,
) -> (String, usize) {
    let raw = original.raw_text.as_str();
    let phrase = original.phrase(range.start..range.end + 1).unwrap_or_default();

    match find_case_insensitive(raw, phrase) {
        Some(span) => {
            let end = extend_by_chars(raw, span.end, context_chars);
            (raw[span.start..end].to_string(), span.start)
        }
        None => {
            let fallback_index = original
                .tokens
                .get(range.start)
                .map(|t| t.raw_start)
                .unwrap_or(0);
            (phrase.to_string(), fallback_index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize, prefix: &str) -> String {
        (0..n)
            .map(|i| format!("{prefix}{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        for (o, s) in [("", "anything at all here"), ("anything at all here", ""), ("", "")] {
            let cmp = find_all_similarities(o, s);
            assert_eq!(cmp.overall_similarity, 0.0);
            assert!(cmp.matches.is_empty());
        }
    }

    #[test]
    fn originals_shorter_than_min_window_never_match() {
        let cmp = find_all_similarities("one two three", "one two three");
        assert!(cmp.matches.is_empty());
        assert_eq!(cmp.overall_similarity, 0.0);
    }

    #[test]
    fn exact_duplicate_covers_everything() {
        let text = "The quick brown fox jumps over the lazy dog while the cat sleeps \
                    soundly on the warm windowsill near the old oak tree.";
        let cmp = find_all_similarities(text, text);
        assert!(cmp.overall_similarity >= 95.0);
        assert_eq!(cmp.matches.len(), 1);
        let only = &cmp.matches[0];
        assert_eq!(only.similarity, 100.0);
        assert_eq!(only.range, CoveredRange::new(0, normalize(text).len() - 1));
        assert_eq!(only.original_index, 0);
    }

    #[test]
    fn greedy_extension_runs_past_max_window() {
        let text = words(40, "w");
        let cmp = find_all_similarities(&text, &text);
        assert_eq!(cmp.matches.len(), 1);
        assert_eq!(cmp.matches[0].range, CoveredRange::new(0, 39));
        assert_eq!(cmp.overall_similarity, 100.0);
    }

    #[test]
    fn disjoint_shared_runs_are_found_separately() {
        let original = format!("{} {} {}", words(6, "a"), words(6, "x"), words(6, "b"));
        let source = format!("{} filler words here {}", words(6, "b"), words(6, "a"));
        let cmp = find_all_similarities(&original, &source);

        assert_eq!(cmp.matches.len(), 2);
        let mut ranges: Vec<_> = cmp.matches.iter().map(|m| m.range).collect();
        ranges.sort_by_key(|r| r.start);
        assert_eq!(ranges, vec![CoveredRange::new(0, 5), CoveredRange::new(12, 17)]);
        let expected = 12.0 / 18.0 * 100.0;
        assert!((cmp.overall_similarity - expected).abs() < 1e-9);
        // Equal similarity: ties fall back to the earlier start.
        assert_eq!(cmp.matches[0].range.start, 0);
    }

    #[test]
    fn covered_ranges_never_overlap() {
        let original = "alpha beta gamma delta epsilon zeta eta theta iota kappa alpha beta \
                        gamma delta epsilon lambda mu nu xi omicron pi rho sigma tau";
        let source = "zeta eta theta iota kappa alpha beta gamma delta epsilon zeta eta \
                      theta and then nu xi omicron pi rho sigma plus alpha beta gamma delta";
        let cmp = find_all_similarities(original, source);
        assert!(!cmp.matches.is_empty());
        for (i, a) in cmp.matches.iter().enumerate() {
            for b in cmp.matches.iter().skip(i + 1) {
                assert!(!a.range.overlaps(&b.range), "{:?} overlaps {:?}", a.range, b.range);
            }
        }
        let covered: usize = cmp.matches.iter().map(|m| m.range.len()).sum();
        let total = normalize(original).len();
        let expected = covered as f64 / total as f64 * 100.0;
        assert!((cmp.overall_similarity - expected).abs() < 1e-9);
    }

    #[test]
    fn longer_window_claims_start_before_shorter() {
        let original = words(30, "t");
        // Source shares the first 12 words, then diverges.
        let source = format!("{} diverges completely afterwards", words(12, "t"));
        let cmp = find_all_similarities(&original, &source);

        assert_eq!(cmp.matches.len(), 1);
        assert_eq!(cmp.matches[0].range, CoveredRange::new(0, 11));
        assert!(cmp.matches.iter().all(|m| m.range.start != 0 || m.range.len() == 12));
    }

    #[test]
    fn substring_hit_may_start_inside_a_source_word() {
        let original = "at the end of the road there was a house";
        let source = "cat the end of the road there was a house by the sea";
        let cmp = find_all_similarities(original, source);

        assert_eq!(cmp.matches.len(), 1);
        assert_eq!(cmp.matches[0].source_index, 1);
        assert_eq!(cmp.overall_similarity, 100.0);
    }

    #[test]
    fn below_threshold_candidates_are_discarded() {
        let original = format!("{} {}", words(4, "s"), words(96, "u"));
        let source = words(4, "s");
        let cmp = find_all_similarities(&original, &source);
        // 4 / 100 words is 4%, under the 5% floor.
        assert!(cmp.matches.is_empty());
        assert_eq!(cmp.overall_similarity, 0.0);

        let lenient = PhraseConfig {
            min_match_similarity: 3.0,
            ..PhraseConfig::default()
        };
        let cmp = find_all_similarities_with(&original, &source, &lenient);
        assert_eq!(cmp.matches.len(), 1);
        assert!((cmp.matches[0].similarity - 4.0).abs() < 1e-9);
    }

    #[test]
    fn excerpt_preserves_case_and_adds_context() {
        let original = "Intro. The Quick Brown Fox Jumps over everything else that moves today";
        let source = "the quick brown fox jumps";
        let cmp = find_all_similarities(original, source);

        assert_eq!(cmp.matches.len(), 1);
        let m = &cmp.matches[0];
        assert_eq!(m.original_index, original.find("The Quick").unwrap());
        assert!(m.matched_text.starts_with("The Quick Brown Fox Jumps"));
        let phrase_len = "The Quick Brown Fox Jumps".len();
        assert_eq!(m.matched_text.chars().count(), phrase_len + 20);
    }

    #[test]
    fn excerpt_falls_back_to_normalized_phrase() {
        let original = "Well: one, two, three, four, five! Done.";
        let source = "one two three four five";
        let cmp = find_all_similarities(original, source);

        assert_eq!(cmp.matches.len(), 1);
        let m = &cmp.matches[0];
        assert_eq!(m.matched_text, "one two three four five");
        assert_eq!(m.original_index, original.find("one").unwrap());
    }

    #[test]
    fn similarity_is_bounded() {
        let text = words(20, "k");
        let cmp = find_all_similarities(&text, &format!("{text} {text}"));
        assert!(cmp.matches.iter().all(|m| (0.0..=100.0).contains(&m.similarity)));
        assert!((0.0..=100.0).contains(&cmp.overall_similarity));
    }

    #[test]
    fn repeated_runs_are_deterministic() {
        let original = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                        tempor incididunt ut labore et dolore magna aliqua.";
        let source = "sed do eiusmod tempor incididunt ut labore and lorem ipsum dolor sit amet";
        let first = find_all_similarities(original, source);
        for _ in 0..5 {
            assert_eq!(find_all_similarities(original, source), first);
        }
    }
}
