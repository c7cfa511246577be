// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The routing state machine: estimate, attempt, verify, repair, escalate.
//!
//! Hard queries go straight to the remote backend and its answer is the
//! quality ceiling. Easy and Medium queries try the local backend first,
//! get one same-backend repair with a doubled token budget, and only then
//! escalate. Every attempt made is accounted for in the decision's cost
//! and latency, including the failed ones.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cascara_config::CascaraConfig;
use cascara_core::{
    Backend, BackendKind, CascaraError, DifficultyScore, DifficultyTier, GenerationResult,
    MetricsSink, RouteStage, RoutingDecision, SimilarityProvider, VerificationOutcome,
};
use cascara_cost::CostModel;
use cascara_verify::Verifier;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::difficulty::DifficultyEstimator;

/// Cumulative counters across every query one router instance has served.
/// Zeroed at construction; there is no process-wide singleton.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RouterStats {
    /// Queries routed to completion (terminal errors excluded).
    pub queries: u64,
    /// Queries answered by a passing first local attempt.
    pub answered_first_try: u64,
    /// Queries answered by the doubled-budget local repair.
    pub repaired: u64,
    /// Queries escalated to the remote backend after a failed repair.
    pub escalated: u64,
    /// Hard-tier queries routed directly to the remote backend.
    pub remote_direct: u64,
    /// Actual spend across all queries, USD.
    pub total_cost_usd: f64,
    /// Savings versus an always-remote baseline, USD.
    pub total_saved_usd: f64,
}

/// Routes queries across a cheap local backend and an expensive remote one.
///
/// Processing is strictly sequential within a query: one estimation, up to
/// three generation calls (at most one remote), up to two verifications.
/// The router holds no per-query state between calls; it can be shared
/// across concurrent callers.
pub struct Router {
    estimator: DifficultyEstimator,
    verifier: Verifier,
    local: Arc<dyn Backend>,
    remote: Arc<dyn Backend>,
    sink: Option<Arc<dyn MetricsSink>>,
    cost_model: CostModel,
    config: CascaraConfig,
    stats: Mutex<RouterStats>,
}

impl Router {
    /// Create a router over the given backends. No similarity provider:
    /// the verifier judges relevance lexically only.
    pub fn new(config: CascaraConfig, local: Arc<dyn Backend>, remote: Arc<dyn Backend>) -> Self {
        Self {
            estimator: DifficultyEstimator::new(&config),
            verifier: Verifier::new(config.verify.clone()),
            local,
            remote,
            sink: None,
            cost_model: CostModel::new(&config.pricing),
            config,
            stats: Mutex::new(RouterStats::default()),
        }
    }

    /// Attach a similarity provider for semantic relevance checks.
    pub fn with_similarity(mut self, similarity: Arc<dyn SimilarityProvider>) -> Self {
        self.verifier = Verifier::with_similarity(self.config.verify.clone(), similarity);
        self
    }

    /// Attach a metrics sink. Recording is fire-and-forget.
    pub fn with_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Snapshot of the cumulative counters.
    pub fn stats(&self) -> RouterStats {
        *self.stats.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Route one query to a best-effort answer.
    ///
    /// Returns a [`RoutingDecision`] carrying the returned answer and the
    /// full attempt history, or [`CascaraError::RouteFailed`] when the
    /// stage with no fallback left failed.
    pub async fn route(&self, query: &str) -> Result<RoutingDecision, CascaraError> {
        let query = query.trim();
        let difficulty = self.estimator.estimate(query);

        match difficulty.tier {
            DifficultyTier::Hard => self.route_hard(query, difficulty).await,
            DifficultyTier::Easy | DifficultyTier::Medium => {
                self.route_local_first(query, difficulty).await
            }
        }
    }

    /// Hard queries skip the local backend entirely: one remote call,
    /// verified for the record but returned regardless of the outcome.
    async fn route_hard(
        &self,
        query: &str,
        difficulty: DifficultyScore,
    ) -> Result<RoutingDecision, CascaraError> {
        let result = self
            .remote
            .generate(query, self.config.routing.hard_max_tokens)
            .await
            .map_err(|err| CascaraError::RouteFailed {
                stage: RouteStage::Attempt1,
                source: Box::new(err),
            })?;

        let outcome = self.verifier.verify(query, &result, difficulty.tier).await;
        if !outcome.is_pass() {
            // No escalation exists above remote; this is the quality ceiling.
            warn!(
                reason = ?outcome.reason(),
                "hard-tier remote answer failed verification; returning anyway"
            );
        }

        Ok(self.finish(query, difficulty, vec![result], outcome, false).await)
    }

    /// Easy/Medium: local attempt, verified; one doubled-budget local
    /// repair; then remote escalation.
    async fn route_local_first(
        &self,
        query: &str,
        difficulty: DifficultyScore,
    ) -> Result<RoutingDecision, CascaraError> {
        let budget = self.attempt_budget(difficulty.tier);
        let mut attempts: Vec<GenerationResult> = Vec::new();
        let mut last_outcome: Option<VerificationOutcome> = None;

        // Attempt 1
        match self.local.generate(query, budget).await {
            Ok(result) => {
                let outcome = self.verifier.verify(query, &result, difficulty.tier).await;
                attempts.push(result);
                last_outcome = Some(outcome);
                if outcome.is_pass() {
                    self.note_stat(|s| s.answered_first_try += 1);
                    return Ok(self.finish(query, difficulty, attempts, outcome, false).await);
                }
            }
            Err(err) => {
                // A backend error is equivalent to a verification failure
                // for this attempt; fall through to the repair.
                warn!(stage = %RouteStage::Attempt1, error = %err, "local generation failed");
            }
        }

        // Attempt 2: same backend, doubled budget. Truncation is the
        // common failure mode and doubling tokens fixes it for free.
        let repair_budget = budget.saturating_mul(self.config.routing.repair_multiplier);
        match self.local.generate(query, repair_budget).await {
            Ok(result) => {
                let outcome = self.verifier.verify(query, &result, difficulty.tier).await;
                attempts.push(result);
                last_outcome = Some(outcome);
                if outcome.is_pass() {
                    self.note_stat(|s| s.repaired += 1);
                    return Ok(self.finish(query, difficulty, attempts, outcome, false).await);
                }
            }
            Err(err) => {
                warn!(stage = %RouteStage::Attempt2, error = %err, "local repair failed");
            }
        }

        // Escalate: the remote answer is returned unconditionally and
        // never re-verified.
        let result = self
            .remote
            .generate(query, self.escalation_budget(difficulty.tier))
            .await
            .map_err(|err| CascaraError::RouteFailed {
                stage: RouteStage::Escalate,
                source: Box::new(err),
            })?;
        attempts.push(result);
        self.note_stat(|s| s.escalated += 1);

        // When both local attempts raised backend errors nothing was ever
        // verified; the trusted remote answer is recorded as passing.
        let outcome = last_outcome.unwrap_or(VerificationOutcome::Pass);
        Ok(self.finish(query, difficulty, attempts, outcome, true).await)
    }

    fn attempt_budget(&self, tier: DifficultyTier) -> u32 {
        match tier {
            DifficultyTier::Easy => self.config.routing.easy_max_tokens,
            DifficultyTier::Medium => self.config.routing.medium_max_tokens,
            DifficultyTier::Hard => self.config.routing.hard_max_tokens,
        }
    }

    fn escalation_budget(&self, tier: DifficultyTier) -> u32 {
        match tier {
            DifficultyTier::Easy => self.config.routing.escalate_easy_max_tokens,
            _ => self.config.routing.escalate_medium_max_tokens,
        }
    }

    /// Build the decision record, update counters, and hand it to the sink.
    async fn finish(
        &self,
        query: &str,
        difficulty: DifficultyScore,
        attempts: Vec<GenerationResult>,
        outcome: VerificationOutcome,
        escalated: bool,
    ) -> RoutingDecision {
        let cost_usd = self.cost_model.decision_cost(&attempts);
        let cost_saved_usd = self.cost_model.savings(&attempts);
        let total_latency: Duration = attempts.iter().map(|a| a.latency).sum();
        let answered_by = attempts
            .last()
            .map(|a| a.backend)
            .unwrap_or(BackendKind::Local);

        let decision = RoutingDecision {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            query: query.to_string(),
            difficulty,
            attempts,
            outcome,
            answered_by,
            cost_usd,
            cost_saved_usd,
            total_latency,
            escalated,
        };

        self.note_stat(|s| {
            s.queries += 1;
            if difficulty.tier == DifficultyTier::Hard {
                s.remote_direct += 1;
            }
            s.total_cost_usd += cost_usd;
            s.total_saved_usd += cost_saved_usd;
        });

        info!(
            id = %decision.id,
            tier = %difficulty.tier,
            score = difficulty.value,
            attempts = decision.attempts.len(),
            answered_by = %decision.answered_by,
            escalated = decision.escalated,
            cost_usd = decision.cost_usd,
            saved_usd = decision.cost_saved_usd,
            "routing decision"
        );

        if let Some(sink) = &self.sink {
            // Failure to record must never fail the query.
            if let Err(err) = sink.record(&decision).await {
                warn!(error = %err, "metrics sink failed to record decision");
            }
        }

        decision
    }

    fn note_stat(&self, update: impl FnOnce(&mut RouterStats)) {
        let mut stats = self
            .stats
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        update(&mut stats);
    }
}
