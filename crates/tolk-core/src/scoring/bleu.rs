//! Sentence-level BLEU.
//!
//! Clipped n-gram precision up to order 4 against any number of references,
//! closest-reference brevity penalty, exponential smoothing for orders with
//! no matches, and effective order so short hypotheses are not zeroed out.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const MAX_NGRAM_ORDER: usize = 4;

/// Stand-in for `log(0)` so a zero precision drives the score to zero.
const LOG_ZERO: f64 = -9_999_999_999.0;

/// Detailed sentence BLEU result; `score` is on a 0–100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BleuScore {
    pub score: f64,
    pub counts: [usize; MAX_NGRAM_ORDER],
    pub totals: [usize; MAX_NGRAM_ORDER],
    pub precisions: [f64; MAX_NGRAM_ORDER],
    pub brevity_penalty: f64,
    pub hyp_len: usize,
    pub ref_len: usize,
}

fn ngram_counts(tokens: &[String], max_order: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    for order in 1..=max_order {
        for window in tokens.windows(order) {
            *counts.entry(window).or_insert(0) += 1;
        }
    }
    counts
}

/// Length of the reference closest to `hyp_len`; ties go to the shorter one.
fn closest_ref_len(hyp_len: usize, references: &[Vec<String>]) -> usize {
    references
        .iter()
        .map(Vec::len)
        .min_by_key(|&len| (len.abs_diff(hyp_len), len))
        .unwrap_or(0)
}

fn safe_ln(value: f64) -> f64 {
    if value == 0.0 { LOG_ZERO } else { value.ln() }
}

/// Scores a tokenized hypothesis against tokenized references.
pub fn sentence_bleu(hypothesis: &[String], references: &[Vec<String>]) -> BleuScore {
    let hyp_len = hypothesis.len();
    let ref_len = closest_ref_len(hyp_len, references);

    // Maximum count of each n-gram over all references
    let mut max_ref_counts: HashMap<&[String], usize> = HashMap::new();
    for reference in references {
        for (ngram, count) in ngram_counts(reference, MAX_NGRAM_ORDER) {
            let entry = max_ref_counts.entry(ngram).or_insert(0);
            *entry = (*entry).max(count);
        }
    }

    let mut counts = [0usize; MAX_NGRAM_ORDER];
    let mut totals = [0usize; MAX_NGRAM_ORDER];
    for order in 1..=MAX_NGRAM_ORDER {
        totals[order - 1] = (hyp_len + 1).saturating_sub(order);
    }
    for (ngram, count) in ngram_counts(hypothesis, MAX_NGRAM_ORDER) {
        if let Some(&reference_count) = max_ref_counts.get(ngram) {
            counts[ngram.len() - 1] += count.min(reference_count);
        }
    }

    let brevity_penalty = if hyp_len < ref_len {
        if hyp_len > 0 {
            (1.0 - ref_len as f64 / hyp_len as f64).exp()
        } else {
            0.0
        }
    } else {
        1.0
    };

    let mut precisions = [0.0f64; MAX_NGRAM_ORDER];
    let mut result = BleuScore {
        score: 0.0,
        counts,
        totals,
        precisions,
        brevity_penalty,
        hyp_len,
        ref_len,
    };

    if counts.iter().all(|&c| c == 0) {
        return result;
    }

    let mut effective_order = MAX_NGRAM_ORDER;
    let mut smooth = 1.0f64;
    for order in 1..=MAX_NGRAM_ORDER {
        let total = totals[order - 1];
        if total == 0 {
            break;
        }
        effective_order = order;
        let correct = counts[order - 1];
        precisions[order - 1] = if correct == 0 {
            smooth *= 2.0;
            100.0 / (smooth * total as f64)
        } else {
            100.0 * correct as f64 / total as f64
        };
    }

    let log_sum: f64 = precisions[..effective_order]
        .iter()
        .map(|&p| safe_ln(p))
        .sum();
    result.score = brevity_penalty * (log_sum / effective_order as f64).exp();
    result.precisions = precisions;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_identical_sentence_scores_100() {
        let result = sentence_bleu(
            &toks("the cat sat on the mat"),
            &[toks("the cat sat on the mat")],
        );
        assert!((result.score - 100.0).abs() < 1e-9);
        assert_eq!(result.brevity_penalty, 1.0);
        assert_eq!(result.counts, [6, 5, 4, 3]);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let result = sentence_bleu(&toks("a b c d"), &[toks("w x y z")]);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_counts_are_clipped_by_reference() {
        let result = sentence_bleu(&toks("the the the the"), &[toks("the cat")]);
        assert_eq!(result.counts[0], 1);
        assert_eq!(result.totals[0], 4);
    }

    #[test]
    fn test_multiple_references_take_max_count() {
        let result = sentence_bleu(
            &toks("the the cat"),
            &[toks("the cat"), toks("the the dog")],
        );
        assert_eq!(result.counts[0], 3);
    }

    #[test]
    fn test_short_hypothesis_uses_effective_order() {
        // Two tokens: only unigram and bigram orders exist
        let result = sentence_bleu(&toks("hello world"), &[toks("hello world")]);
        assert!((result.score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_brevity_penalty_uses_closest_reference() {
        let result = sentence_bleu(
            &toks("the cat"),
            &[toks("the cat sat on the mat"), toks("the cat sat")],
        );
        assert_eq!(result.ref_len, 3);
        let expected_bp = (1.0f64 - 3.0 / 2.0).exp();
        assert!((result.brevity_penalty - expected_bp).abs() < 1e-12);
    }

    #[test]
    fn test_exponential_smoothing_for_missing_orders() {
        // unigrams match, no higher order matches
        let result = sentence_bleu(&toks("mat the on sat"), &[toks("the cat sat on the mat")]);
        assert_eq!(result.counts, [4, 0, 0, 0]);
        assert!((result.precisions[1] - 100.0 / (2.0 * 3.0)).abs() < 1e-9);
        assert!((result.precisions[2] - 100.0 / (4.0 * 2.0)).abs() < 1e-9);
        assert!((result.precisions[3] - 100.0 / (8.0 * 1.0)).abs() < 1e-9);
        assert!(result.score > 0.0 && result.score < 100.0);
    }

    #[test]
    fn test_empty_hypothesis() {
        let result = sentence_bleu(&[], &[toks("anything")]);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.hyp_len, 0);
    }
}
