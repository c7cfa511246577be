// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic similarity provider trait.

use async_trait::async_trait;

use crate::error::CascaraError;

/// Scores the semantic similarity of two texts.
///
/// The verifier injects this to judge answer relevance. Implementations
/// return a score in `[-1, 1]` (typically cosine similarity over
/// embeddings) or [`CascaraError::Embedding`] when the provider is
/// unreachable. Callers must degrade gracefully on error; a provider
/// outage never blocks an answer.
#[async_trait]
pub trait SimilarityProvider: Send + Sync {
    /// Semantic similarity of `text_a` and `text_b` in `[-1, 1]`.
    async fn score(&self, text_a: &str, text_b: &str) -> Result<f64, CascaraError>;
}
