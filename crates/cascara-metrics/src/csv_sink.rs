// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV sink for routing decisions.
//!
//! One row per finalized decision, flushed immediately so partial runs
//! still leave a usable file behind.

use std::fs::File;
use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;

use cascara_core::traits::MetricsSink;
use cascara_core::{CascaraError, RoutingDecision};

use crate::summary::route_label;

/// Long queries are truncated in the CSV so rows stay readable.
const MAX_QUERY_CHARS: usize = 200;

/// Flat row shape written to the CSV file.
#[derive(Debug, Serialize)]
struct DecisionRow<'a> {
    timestamp: String,
    query: &'a str,
    difficulty: f64,
    tier: String,
    route: &'static str,
    answered_by: String,
    attempts: usize,
    input_tokens: u64,
    output_tokens: u64,
    total_tokens: u64,
    latency_ms: f64,
    cost_usd: f64,
    cost_saved_usd: f64,
}

/// Appends one CSV row per routing decision.
pub struct CsvSink {
    writer: Mutex<csv::Writer<File>>,
}

impl CsvSink {
    /// Create (or truncate) the CSV file at `path`. Headers come from the
    /// row struct on the first write.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, CascaraError> {
        let writer = csv::Writer::from_path(path.as_ref())
            .map_err(|e| CascaraError::Internal(format!("csv sink: {e}")))?;
        Ok(Self {
            writer: Mutex::new(writer),
        })
    }
}

#[async_trait]
impl MetricsSink for CsvSink {
    async fn record(&self, decision: &RoutingDecision) -> Result<(), CascaraError> {
        let usage = decision.total_usage();
        let query = truncate_chars(&decision.query, MAX_QUERY_CHARS);
        let row = DecisionRow {
            timestamp: decision
                .timestamp
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            query,
            difficulty: decision.difficulty.value,
            tier: decision.difficulty.tier.to_string(),
            route: route_label(decision),
            answered_by: decision.answered_by.to_string(),
            attempts: decision.attempts.len(),
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            total_tokens: usage.total(),
            latency_ms: decision.total_latency.as_secs_f64() * 1000.0,
            cost_usd: decision.cost_usd,
            cost_saved_usd: decision.cost_saved_usd,
        };

        let mut writer = self.writer.lock().await;
        writer
            .serialize(&row)
            .map_err(|e| CascaraError::Internal(format!("csv sink: {e}")))?;
        writer
            .flush()
            .map_err(|e| CascaraError::Internal(format!("csv sink: {e}")))?;

        info!(id = %decision.id, route = row.route, "decision logged");
        Ok(())
    }
}

/// Cut at a char boundary, never mid-codepoint.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::decision;
    use cascara_core::BackendKind;

    #[tokio::test]
    async fn rows_land_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decisions.csv");
        let sink = CsvSink::create(&path).unwrap();

        sink.record(&decision("what is rust", BackendKind::Local, 1, false))
            .await
            .unwrap();
        sink.record(&decision("prove it", BackendKind::Remote, 1, false))
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("timestamp,query,difficulty"));
        assert_eq!(lines.count(), 2);
        assert!(contents.contains("what is rust"));
        assert!(contents.contains("remote_direct"));
    }

    #[tokio::test]
    async fn long_queries_are_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decisions.csv");
        let sink = CsvSink::create(&path).unwrap();

        let long_query = "x".repeat(500);
        sink.record(&decision(&long_query, BackendKind::Local, 1, false))
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains(&"x".repeat(200)));
        assert!(!contents.contains(&"x".repeat(201)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let s = "é".repeat(300);
        let cut = truncate_chars(&s, 200);
        assert_eq!(cut.chars().count(), 200);
    }
}
