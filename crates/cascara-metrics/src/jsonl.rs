// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON Lines sink for routing decisions.
//!
//! Unlike the CSV sink this keeps the full decision record, attempt
//! history included, one JSON object per line.

use std::path::Path;

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use cascara_core::traits::MetricsSink;
use cascara_core::{CascaraError, RoutingDecision};

/// Appends one JSON object per routing decision to a log file.
pub struct JsonlSink {
    file: Mutex<File>,
}

impl JsonlSink {
    /// Open `path` in append mode, creating it if missing.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CascaraError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .await
            .map_err(|e| CascaraError::Internal(format!("jsonl sink: {e}")))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

#[async_trait]
impl MetricsSink for JsonlSink {
    async fn record(&self, decision: &RoutingDecision) -> Result<(), CascaraError> {
        let mut line = serde_json::to_string(decision)
            .map_err(|e| CascaraError::Internal(format!("jsonl sink: {e}")))?;
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| CascaraError::Internal(format!("jsonl sink: {e}")))?;
        file.flush()
            .await
            .map_err(|e| CascaraError::Internal(format!("jsonl sink: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::decision;
    use cascara_core::BackendKind;

    #[tokio::test]
    async fn decisions_round_trip_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decisions.jsonl");
        let sink = JsonlSink::open(&path).await.unwrap();

        let original = decision("what is rust", BackendKind::Local, 1, false);
        sink.record(&original).await.unwrap();
        sink.record(&decision("prove it", BackendKind::Remote, 1, false))
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: RoutingDecision = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.id, original.id);
        assert_eq!(parsed.query, "what is rust");
        assert_eq!(parsed.attempts.len(), 1);
    }

    #[tokio::test]
    async fn open_appends_to_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decisions.jsonl");

        {
            let sink = JsonlSink::open(&path).await.unwrap();
            sink.record(&decision("q1", BackendKind::Local, 1, false))
                .await
                .unwrap();
        }
        {
            let sink = JsonlSink::open(&path).await.unwrap();
            sink.record(&decision("q2", BackendKind::Local, 1, false))
                .await
                .unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
