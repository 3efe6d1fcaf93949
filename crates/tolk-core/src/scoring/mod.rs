//! Translation quality scoring against user-supplied references.

pub mod bleu;
pub mod script;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

pub use bleu::{BleuScore, sentence_bleu};
pub use script::{Script, detect_script};
pub use tokenizer::{Tokenizer, tokenizer_for};

/// Narrow seam for the similarity metric so any equivalent implementation
/// can be swapped in.
pub trait Scorer: Send + Sync {
    /// Returns a score on a 0–100 scale, or `None` when no score can be
    /// computed (no references, or an empty candidate).
    fn score(&self, candidate: &str, references: &[String]) -> Option<f64>;
}

/// Sentence BLEU with a tokenizer picked from the candidate's script.
#[derive(Debug, Clone, Copy, Default)]
pub struct BleuScorer;

impl BleuScorer {
    pub fn new() -> Self {
        Self
    }

    /// Full BLEU breakdown, or `None` under the same conditions as [`Scorer::score`].
    pub fn detailed(&self, candidate: &str, references: &[String]) -> Option<BleuScore> {
        if references.is_empty() || candidate.trim().is_empty() {
            return None;
        }

        let script = detect_script(candidate);
        let tokenizer = tokenizer_for(script);
        tracing::debug!(
            ?script,
            tokenizer = tokenizer.name(),
            references = references.len(),
            "[BleuScorer] Scoring candidate"
        );

        let hypothesis = tokenizer.tokenize(candidate);
        let references: Vec<Vec<String>> =
            references.iter().map(|r| tokenizer.tokenize(r)).collect();
        Some(sentence_bleu(&hypothesis, &references))
    }
}

impl Scorer for BleuScorer {
    fn score(&self, candidate: &str, references: &[String]) -> Option<f64> {
        self.detailed(candidate, references).map(|result| result.score)
    }
}

/// Converts a 0–100 score to the 0.0–1.0 value shown to the user.
pub fn display_value(score: f64) -> f64 {
    score / 100.0
}

/// Six display bands at 0.1 intervals, from most alarming to most positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Critical,
    Poor,
    Weak,
    Fair,
    Good,
    Excellent,
}

impl ScoreBand {
    /// Band for a display value (0.0–1.0).
    pub fn from_display(value: f64) -> Self {
        if value < 0.1 {
            ScoreBand::Critical
        } else if value < 0.2 {
            ScoreBand::Poor
        } else if value < 0.3 {
            ScoreBand::Weak
        } else if value < 0.4 {
            ScoreBand::Fair
        } else if value < 0.5 {
            ScoreBand::Good
        } else {
            ScoreBand::Excellent
        }
    }

    /// CSS colour used by the desktop front-end.
    pub fn color(&self) -> &'static str {
        match self {
            ScoreBand::Critical => "#8b0000",
            ScoreBand::Poor => "#ee0000",
            ScoreBand::Weak => "#ffa500",
            ScoreBand::Fair => "#32cd32",
            ScoreBand::Good => "#00ee00",
            ScoreBand::Excellent => "#008b00",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_no_references_means_no_score() {
        assert_eq!(BleuScorer.score("Bonjour le monde", &[]), None);
    }

    #[test]
    fn test_blank_candidate_means_no_score() {
        let references = refs(&["Bonjour"]);
        assert_eq!(BleuScorer.score("", &references), None);
        assert_eq!(BleuScorer.score("  \n\t", &references), None);
    }

    #[test]
    fn test_exact_match_scores_100() {
        let references = refs(&["Le chat est sur le tapis."]);
        let score = BleuScorer.score("Le chat est sur le tapis.", &references).unwrap();
        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_chinese_candidate_is_scored_per_character() {
        // Without per-character splitting these would share no tokens
        let references = refs(&["我爱北京天安门"]);
        let score = BleuScorer.score("我爱北京", &references).unwrap();
        assert!(score > 0.0);
    }

    #[test]
    fn test_trailing_newline_does_not_change_score() {
        let references = refs(&["Guten Morgen"]);
        let a = BleuScorer.score("Guten Morgen", &references).unwrap();
        let b = BleuScorer.score("Guten Morgen\n", &references).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bands() {
        assert_eq!(ScoreBand::from_display(0.0), ScoreBand::Critical);
        assert_eq!(ScoreBand::from_display(0.15), ScoreBand::Poor);
        assert_eq!(ScoreBand::from_display(0.195), ScoreBand::Poor);
        assert_eq!(ScoreBand::from_display(0.25), ScoreBand::Weak);
        assert_eq!(ScoreBand::from_display(0.35), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_display(0.45), ScoreBand::Good);
        assert_eq!(ScoreBand::from_display(0.5), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_display(1.0), ScoreBand::Excellent);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(42.0), 0.42);
    }
}
