// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sinks and summaries for routing decisions.
//!
//! [`CsvSink`] streams one flat row per decision to disk, [`JsonlSink`]
//! keeps the full record as JSON Lines, [`MemorySink`] buffers decisions
//! in process, and [`RunSummary`] folds a batch into the totals
//! reporting cares about.

pub mod csv_sink;
pub mod jsonl;
pub mod memory;
pub mod summary;

pub use csv_sink::CsvSink;
pub use jsonl::JsonlSink;
pub use memory::MemorySink;
pub use summary::{route_label, RunSummary};

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use cascara_core::{
        BackendKind, DifficultyScore, GenerationResult, RoutingDecision, TokenUsage,
        VerificationOutcome,
    };

    /// Build a decision with `attempts` generation calls, the last one on
    /// `answered_by` and any earlier ones on the local backend.
    pub fn decision(
        query: &str,
        answered_by: BackendKind,
        attempts: usize,
        escalated: bool,
    ) -> RoutingDecision {
        let attempts = (0..attempts)
            .map(|i| GenerationResult {
                text: "An answer.".to_string(),
                usage: TokenUsage {
                    input_tokens: 10,
                    output_tokens: 20,
                },
                latency: Duration::from_millis(5),
                backend: if i + 1 == attempts {
                    answered_by
                } else {
                    BackendKind::Local
                },
            })
            .collect::<Vec<_>>();

        RoutingDecision {
            id: uuid::Uuid::new_v4(),
            timestamp: chrono::Utc::now(),
            query: query.to_string(),
            difficulty: DifficultyScore::new(0.2, 0.3, 0.6),
            attempts,
            outcome: VerificationOutcome::Pass,
            answered_by,
            cost_usd: 0.001,
            cost_saved_usd: 0.002,
            total_latency: Duration::from_millis(5),
            escalated,
        }
    }
}
