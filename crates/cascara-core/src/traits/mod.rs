// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the routing core.
//!
//! The decision engine never depends on a concrete inference engine,
//! embedding provider, or log store; it talks to these contracts.

pub mod backend;
pub mod similarity;
pub mod sink;

pub use backend::Backend;
pub use similarity::SimilarityProvider;
pub use sink::MetricsSink;
