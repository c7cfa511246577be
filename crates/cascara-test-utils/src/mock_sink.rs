// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock metrics sink that always fails.

use async_trait::async_trait;

use cascara_core::traits::MetricsSink;
use cascara_core::{CascaraError, RoutingDecision};

/// Rejects every record call, simulating a full disk or closed file.
pub struct FailingSink;

#[async_trait]
impl MetricsSink for FailingSink {
    async fn record(&self, _decision: &RoutingDecision) -> Result<(), CascaraError> {
        Err(CascaraError::Internal(
            "sink rejected the decision".to_string(),
        ))
    }
}
