// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zero-cost query difficulty estimation.
//!
//! Scores a query in `[0, 1]` from static lexical and structural features:
//! no model call, no network, no latency. Routing decisions stay
//! reproducible because the estimate is a pure function of the query text
//! and configuration.

use cascara_config::CascaraConfig;
use cascara_config::model::EstimatorConfig;
use cascara_core::DifficultyScore;

/// Estimates query difficulty using zero-cost signals.
///
/// Total (never fails) and stable (same input, same output). The score is
/// a weighted sum of three terms, each clamped to `[0, 1]` before
/// weighting, with a floor applied when hard-signal vocabulary is present.
pub struct DifficultyEstimator {
    config: EstimatorConfig,
    easy_threshold: f64,
    hard_threshold: f64,
}

impl DifficultyEstimator {
    pub fn new(config: &CascaraConfig) -> Self {
        Self {
            config: config.estimator.clone(),
            easy_threshold: config.routing.easy_threshold,
            hard_threshold: config.routing.hard_threshold,
        }
    }

    /// Estimate the difficulty of a query.
    pub fn estimate(&self, query: &str) -> DifficultyScore {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return DifficultyScore::new(0.0, self.easy_threshold, self.hard_threshold);
        }

        // Single-spaced lowercase word stream; whole-word and whole-phrase
        // matching both run against this.
        let words: Vec<String> = trimmed
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .map(String::from)
            .collect();
        let normalized = format!(" {} ", words.join(" "));

        let length_term = (words.len() as f64 / self.config.length_cap_words as f64).min(1.0);
        let structure_term = structure_term(trimmed, &normalized);

        let hard_hits = count_hits(&normalized, &self.config.hard_keywords);
        let medium_hits = count_hits(&normalized, &self.config.medium_keywords);
        let easy_hits = count_hits(&normalized, &self.config.easy_keywords);
        let keyword_term = (0.5 + 0.25 * (hard_hits + medium_hits) as f64
            - 0.25 * easy_hits as f64)
            .clamp(0.0, 1.0);

        let mut score = self.config.length_weight * length_term
            + self.config.structure_weight * structure_term
            + self.config.keyword_weight * keyword_term;

        // Force multiplier: strong hard-signal vocabulary must never be
        // misrouted to the easy path, whatever the weighted sum says.
        if hard_hits > 0 {
            score = score.max(self.config.hard_floor);
        }

        DifficultyScore::new(score, self.easy_threshold, self.hard_threshold)
    }
}

/// Multi-clause and multi-question structure signals, clamped to `[0, 1]`.
fn structure_term(raw: &str, normalized: &str) -> f64 {
    let mut term: f64 = 0.0;

    // Several question marks mean several sub-questions.
    if raw.matches('?').count() >= 2 {
        term += 0.5;
    }

    // Clause connectors.
    const CONNECTORS: &[&str] = &[" and ", " but ", " whereas ", " while ", " as well as "];
    let connectors: usize = CONNECTORS.iter().map(|c| normalized.matches(c).count()).sum();
    term += 0.25 * connectors as f64;

    // Enumerated comparison phrasing ("compare X and Y", "X vs Y").
    if normalized.contains(" compare ")
        || normalized.contains(" versus ")
        || normalized.contains(" vs ")
    {
        term += 0.3;
    }

    term.min(1.0)
}

/// Count lexicon terms present in the normalized word stream.
/// Case-insensitive, whole-word; multiword phrases match as phrases.
fn count_hits(normalized: &str, lexicon: &[String]) -> usize {
    lexicon
        .iter()
        .filter(|term| {
            let needle = format!(" {} ", term.trim().to_lowercase());
            normalized.contains(&needle)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use cascara_core::DifficultyTier;
    use proptest::prelude::*;

    use super::*;

    fn estimator() -> DifficultyEstimator {
        DifficultyEstimator::new(&CascaraConfig::default())
    }

    #[test]
    fn capital_of_france_is_easy() {
        let score = estimator().estimate("What is the capital of France?");
        assert!(score.value < 0.3, "score {} should be below 0.3", score.value);
        assert_eq!(score.tier, DifficultyTier::Easy);
    }

    #[test]
    fn entropy_proof_is_forced_hard() {
        let score = estimator().estimate(
            "Why does increasing entropy imply irreversibility in thermodynamic systems? Prove it.",
        );
        assert!(score.value >= 0.6, "hard keywords must floor the score");
        assert_eq!(score.tier, DifficultyTier::Hard);
    }

    #[test]
    fn tcp_explanation_is_medium() {
        let score = estimator().estimate("Explain how TCP congestion control works.");
        assert_eq!(score.tier, DifficultyTier::Medium, "score was {}", score.value);
    }

    #[test]
    fn comparison_phrasing_boosts_structure() {
        let e = estimator();
        let plain = e.estimate("Describe Rust's ownership model.");
        let compared = e.estimate("Compare Rust's ownership model and Java's garbage collection.");
        assert!(compared.value > plain.value);
    }

    #[test]
    fn easy_keywords_pull_the_score_down() {
        let e = estimator();
        let define = e.estimate("Define photosynthesis");
        assert_eq!(define.tier, DifficultyTier::Easy);
    }

    #[test]
    fn empty_query_is_easy() {
        let score = estimator().estimate("   ");
        assert_eq!(score.value, 0.0);
        assert_eq!(score.tier, DifficultyTier::Easy);
    }

    #[test]
    fn keyword_matching_is_whole_word() {
        // "whyever" must not hit the "why" hard keyword.
        let score = estimator().estimate("Whyever would the compiler reject this code");
        assert!(score.value < 0.6, "substring must not trigger the floor");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let e = estimator();
        let upper = e.estimate("WHY does this happen? PROVE it.");
        assert_eq!(upper.tier, DifficultyTier::Hard);
    }

    proptest! {
        #[test]
        fn score_is_always_in_unit_interval(query in ".{0,400}") {
            let score = estimator().estimate(&query);
            prop_assert!((0.0..=1.0).contains(&score.value));
        }

        #[test]
        fn estimation_is_idempotent(query in ".{0,400}") {
            let e = estimator();
            let first = e.estimate(&query);
            let second = e.estimate(&query);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn hard_keyword_floors_the_score(prefix in "[a-z ]{0,100}") {
            let query = format!("{prefix} prove the claim");
            let score = estimator().estimate(&query);
            prop_assert!(score.value >= 0.6, "got {}", score.value);
            prop_assert_eq!(score.tier, DifficultyTier::Hard);
        }

        #[test]
        fn tier_is_a_function_of_the_score(query in ".{0,400}") {
            let score = estimator().estimate(&query);
            let expected = if score.value < 0.3 {
                DifficultyTier::Easy
            } else if score.value < 0.6 {
                DifficultyTier::Medium
            } else {
                DifficultyTier::Hard
            };
            prop_assert_eq!(score.tier, expected);
        }
    }
}
