// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Cascara routing pipeline.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Identity of an inference backend: the cheap on-box model or the
/// expensive remote API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Local,
    Remote,
}

/// Token counts for a single generation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    /// Combined input + output token count.
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Output of one backend generation call. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Generated completion text.
    pub text: String,
    /// Token counts reported by the backend.
    pub usage: TokenUsage,
    /// Wall-clock latency of the call.
    pub latency: Duration,
    /// Which backend produced this result.
    pub backend: BackendKind,
}

/// Discrete difficulty bucket derived from the continuous score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    /// Simple facts, definitions, short lookups.
    Easy,
    /// Explanations and comparisons.
    Medium,
    /// Reasoning, proofs, open-ended analysis.
    Hard,
}

/// A difficulty score clamped into `[0, 1]` paired with its derived tier.
///
/// The score-to-tier mapping lives here and nowhere else: scores below the
/// easy threshold are [`DifficultyTier::Easy`], scores below the hard
/// threshold are [`DifficultyTier::Medium`], everything else is
/// [`DifficultyTier::Hard`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyScore {
    pub value: f64,
    pub tier: DifficultyTier,
}

impl DifficultyScore {
    /// Clamp `value` into `[0, 1]` and derive the tier from the thresholds.
    pub fn new(value: f64, easy_threshold: f64, hard_threshold: f64) -> Self {
        let value = value.clamp(0.0, 1.0);
        let tier = if value < easy_threshold {
            DifficultyTier::Easy
        } else if value < hard_threshold {
            DifficultyTier::Medium
        } else {
            DifficultyTier::Hard
        };
        Self { value, tier }
    }
}

/// Why a response was judged inadequate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    /// Response ends mid-sentence or mid-clause.
    Truncated,
    /// Response hedges with low-confidence phrasing.
    Uncertain,
    /// Response is semantically off-topic for the query.
    LowRelevance,
    /// An enumeration query got fewer items than it asked for.
    IncompleteList,
}

/// Verdict of one verification pass over a generated answer.
///
/// Produced fresh for every verification call; never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Acceptable as-is.
    Pass,
    /// Inadequate but plausibly fixed by a same-backend retry with a
    /// larger token budget.
    Repairable(FailReason),
    /// Inadequate beyond repair; needs a better backend.
    Fail(FailReason),
}

impl VerificationOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, VerificationOutcome::Pass)
    }

    /// The failure reason, if any.
    pub fn reason(&self) -> Option<FailReason> {
        match self {
            VerificationOutcome::Pass => None,
            VerificationOutcome::Repairable(r) | VerificationOutcome::Fail(r) => Some(*r),
        }
    }
}

/// Pipeline stage at which a backend call was made, for error attribution
/// and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RouteStage {
    /// First generation attempt (local for Easy/Medium, remote for Hard).
    Attempt1,
    /// Same-backend repair retry with a doubled token budget.
    Attempt2,
    /// Remote escalation after a failed repair.
    Escalate,
}

/// The final record for one routed query; the unit handed to metrics sinks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Stable record id.
    pub id: Uuid,
    /// When the decision was finalized.
    pub timestamp: DateTime<Utc>,
    /// The (whitespace-trimmed) query that was routed.
    pub query: String,
    /// Estimated difficulty.
    pub difficulty: DifficultyScore,
    /// Every generation call actually made, in order. Holds one to three
    /// entries: the worst-case path is local, local repair, remote
    /// escalation.
    pub attempts: Vec<GenerationResult>,
    /// Outcome of the last verification performed. Escalated answers are
    /// never re-verified, so this is the outcome that triggered escalation.
    pub outcome: VerificationOutcome,
    /// Backend whose answer was returned.
    pub answered_by: BackendKind,
    /// Actual spend across all attempts, in USD.
    pub cost_usd: f64,
    /// Hypothetical always-remote baseline minus actual spend.
    pub cost_saved_usd: f64,
    /// Latency summed across every attempt, including failed ones.
    pub total_latency: Duration,
    /// True only when a failed local repair forced a remote call.
    pub escalated: bool,
}

impl RoutingDecision {
    /// The result whose text is returned to the caller (the last attempt).
    pub fn final_result(&self) -> Option<&GenerationResult> {
        self.attempts.last()
    }

    /// Token usage summed across all attempts.
    pub fn total_usage(&self) -> TokenUsage {
        self.attempts.iter().fold(TokenUsage::default(), |acc, a| TokenUsage {
            input_tokens: acc.input_tokens + a.usage.input_tokens,
            output_tokens: acc.output_tokens + a.usage.output_tokens,
        })
    }
}
