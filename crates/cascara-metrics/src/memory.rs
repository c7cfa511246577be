// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory sink for tests and in-process reporting.

use std::sync::Mutex;

use async_trait::async_trait;

use cascara_core::traits::MetricsSink;
use cascara_core::{CascaraError, RoutingDecision};

use crate::summary::RunSummary;

/// Buffers every decision in memory.
///
/// Useful in tests and in short-lived batch runs where a summary is
/// printed at the end instead of streaming rows to disk.
#[derive(Default)]
pub struct MemorySink {
    decisions: Mutex<Vec<RoutingDecision>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn decisions(&self) -> Vec<RoutingDecision> {
        self.decisions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Summarize everything recorded so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_decisions(&self.decisions())
    }
}

#[async_trait]
impl MetricsSink for MemorySink {
    async fn record(&self, decision: &RoutingDecision) -> Result<(), CascaraError> {
        self.decisions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(decision.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::decision;
    use cascara_core::BackendKind;

    #[tokio::test]
    async fn record_buffers_decisions() {
        let sink = MemorySink::new();
        sink.record(&decision("q1", BackendKind::Local, 1, false))
            .await
            .unwrap();
        sink.record(&decision("q2", BackendKind::Remote, 3, true))
            .await
            .unwrap();

        let buffered = sink.decisions();
        assert_eq!(buffered.len(), 2);
        assert_eq!(buffered[0].query, "q1");

        let summary = sink.summary();
        assert_eq!(summary.total_queries, 2);
        assert_eq!(summary.escalated, 1);
    }
}
