// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer verification for the Cascara routing engine.
//!
//! Judges whether a generated answer is acceptable for a query at a given
//! difficulty tier. Checks run in a fixed order, cheapest first, and
//! short-circuit on the first failure: truncation, uncertainty, list
//! delivery, lexical coverage, then (only when coverage is inconclusive)
//! semantic relevance through an injected [`SimilarityProvider`].
//!
//! Relevance gating is deliberately asymmetric: Easy answers skip it,
//! Medium answers can only be warned about, and Hard answers fail only
//! below a lenient floor. Verification must not be strict about creative
//! answers it cannot fairly judge.

pub mod checks;
pub mod relevance;

use std::sync::Arc;

use cascara_config::model::VerifyConfig;
use cascara_core::{
    DifficultyTier, FailReason, GenerationResult, SimilarityProvider, VerificationOutcome,
};
use tracing::{debug, warn};

use crate::relevance::Coverage;

/// Verifies generated answers against their queries.
///
/// Stateless between calls: identical inputs always produce identical
/// outcomes (assuming a deterministic similarity provider).
pub struct Verifier {
    similarity: Option<Arc<dyn SimilarityProvider>>,
    config: VerifyConfig,
}

impl Verifier {
    /// Create a verifier with no similarity provider. Semantic relevance
    /// degrades to lexical-only judgment.
    pub fn new(config: VerifyConfig) -> Self {
        Self {
            similarity: None,
            config,
        }
    }

    /// Create a verifier backed by a similarity provider.
    pub fn with_similarity(config: VerifyConfig, similarity: Arc<dyn SimilarityProvider>) -> Self {
        Self {
            similarity: Some(similarity),
            config,
        }
    }

    /// Judge one generated answer. Infallible: provider outages degrade to
    /// lexical-only judgment rather than erroring.
    pub async fn verify(
        &self,
        query: &str,
        result: &GenerationResult,
        tier: DifficultyTier,
    ) -> VerificationOutcome {
        let answer = result.text.trim();

        // 1. Truncation / completeness
        if checks::is_truncated(answer, query) {
            return VerificationOutcome::Repairable(FailReason::Truncated);
        }

        // 2. Uncertainty / hedging
        let answer_lower = answer.to_lowercase();
        if self
            .config
            .uncertainty_phrases
            .iter()
            .any(|p| answer_lower.contains(p.as_str()))
        {
            return VerificationOutcome::Repairable(FailReason::Uncertain);
        }

        // 3. List delivery
        if let Some(requested) = checks::requested_item_count(query) {
            let delivered = checks::delivered_item_count(answer);
            if delivered < requested {
                debug!(requested, delivered, "enumeration under-delivered");
                return VerificationOutcome::Repairable(FailReason::IncompleteList);
            }
        }

        // Easy answers need completeness, not topic-drift detection; all
        // relevance machinery is skipped.
        if tier == DifficultyTier::Easy {
            return VerificationOutcome::Pass;
        }

        // 4. Lexical coverage gate: strong coverage accepts relevance
        // without paying for an embedding call.
        let coverage = relevance::lexical_coverage(query, answer);
        if coverage.fraction >= self.config.coverage_strong_fraction {
            return VerificationOutcome::Pass;
        }

        // 5. Semantic relevance, difficulty-gated.
        self.check_semantic_relevance(query, answer, tier, coverage).await
    }

    async fn check_semantic_relevance(
        &self,
        query: &str,
        answer: &str,
        tier: DifficultyTier,
        coverage: Coverage,
    ) -> VerificationOutcome {
        let Some(similarity) = &self.similarity else {
            return self.lexical_only(tier, coverage);
        };

        // Embedding only the answer's head keeps the topic signal from
        // being diluted by long tails.
        let prefix = char_prefix(answer, self.config.embed_prefix_chars);

        match similarity.score(query, prefix).await {
            Ok(score) => match tier {
                DifficultyTier::Medium => {
                    // Advisory only: the documented design bet is that
                    // Medium answers are never failed on relevance.
                    if score < self.config.medium_relevance_floor {
                        warn!(
                            similarity = score,
                            floor = self.config.medium_relevance_floor,
                            "low relevance on medium-tier answer (advisory, passing)"
                        );
                    }
                    VerificationOutcome::Pass
                }
                DifficultyTier::Hard => {
                    if score < self.config.hard_relevance_floor {
                        return VerificationOutcome::Fail(FailReason::LowRelevance);
                    }
                    VerificationOutcome::Pass
                }
                // Easy never reaches the relevance steps.
                DifficultyTier::Easy => VerificationOutcome::Pass,
            },
            Err(err) => {
                warn!(error = %err, "similarity provider failed; degrading to lexical-only");
                self.lexical_only(tier, coverage)
            }
        }
    }

    /// Judgment without the similarity provider: Medium assumes pass; Hard
    /// falls back to the lexical minimum.
    fn lexical_only(&self, tier: DifficultyTier, coverage: Coverage) -> VerificationOutcome {
        if tier == DifficultyTier::Hard && coverage.fraction < self.config.coverage_min_fraction {
            return VerificationOutcome::Fail(FailReason::LowRelevance);
        }
        VerificationOutcome::Pass
    }
}

/// First `n` characters of `s`, respecting char boundaries.
fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
