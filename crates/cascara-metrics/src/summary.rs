// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregate statistics over a batch of routing decisions.

use serde::Serialize;

use cascara_core::{BackendKind, RoutingDecision};

/// Which path a decision took, as a stable label for reports and CSV rows.
pub fn route_label(decision: &RoutingDecision) -> &'static str {
    if decision.escalated {
        "escalated"
    } else if decision.answered_by == BackendKind::Remote {
        "remote_direct"
    } else if decision.attempts.len() == 1 {
        "local"
    } else {
        "local_repair"
    }
}

/// Totals over a run, in the shape reporting tools expect.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub total_queries: usize,
    pub local_first_try: usize,
    pub local_repaired: usize,
    pub escalated: usize,
    pub remote_direct: usize,
    pub total_cost_usd: f64,
    pub total_saved_usd: f64,
    pub avg_latency_ms: f64,
    pub total_tokens: u64,
}

impl RunSummary {
    /// Fold a batch of decisions into one summary.
    pub fn from_decisions(decisions: &[RoutingDecision]) -> Self {
        let mut summary = RunSummary::default();
        let mut latency_ms = 0.0;

        for decision in decisions {
            summary.total_queries += 1;
            match route_label(decision) {
                "local" => summary.local_first_try += 1,
                "local_repair" => summary.local_repaired += 1,
                "escalated" => summary.escalated += 1,
                _ => summary.remote_direct += 1,
            }
            summary.total_cost_usd += decision.cost_usd;
            summary.total_saved_usd += decision.cost_saved_usd;
            summary.total_tokens += decision.total_usage().total();
            latency_ms += decision.total_latency.as_secs_f64() * 1000.0;
        }

        if summary.total_queries > 0 {
            summary.avg_latency_ms = latency_ms / summary.total_queries as f64;
        }
        summary
    }
}
