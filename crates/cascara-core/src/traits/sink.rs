// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metrics sink trait for routing-decision persistence.

use async_trait::async_trait;

use crate::error::CascaraError;
use crate::types::RoutingDecision;

/// Persists finalized routing decisions.
///
/// Fire-and-forget from the router's point of view: a sink failure is
/// logged and swallowed, never surfaced to the query's caller.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    /// Record one routing decision.
    async fn record(&self, decision: &RoutingDecision) -> Result<(), CascaraError>;
}
