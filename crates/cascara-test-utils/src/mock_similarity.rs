// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock similarity providers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use cascara_core::traits::SimilarityProvider;
use cascara_core::CascaraError;

/// Returns the same score for every pair and counts invocations.
pub struct FixedSimilarity {
    score: f64,
    calls: Arc<AtomicUsize>,
}

impl FixedSimilarity {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SimilarityProvider for FixedSimilarity {
    async fn score(&self, _a: &str, _b: &str) -> Result<f64, CascaraError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.score)
    }
}

/// Fails every scoring request, simulating a provider outage.
pub struct FailingSimilarity;

#[async_trait]
impl SimilarityProvider for FailingSimilarity {
    async fn score(&self, _a: &str, _b: &str) -> Result<f64, CascaraError> {
        Err(CascaraError::embedding("similarity provider unavailable"))
    }
}
