// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Cascara cost-aware routing engine.
//!
//! This crate provides the shared types, error taxonomy, and collaborator
//! traits used throughout the Cascara workspace. Backends, similarity
//! providers, and metrics sinks implement the traits defined here; the
//! router and verifier consume them.

pub mod error;
pub mod traits;
pub mod types;

pub use error::CascaraError;
pub use types::{
    BackendKind, DifficultyScore, DifficultyTier, FailReason, GenerationResult,
    RouteStage, RoutingDecision, TokenUsage, VerificationOutcome,
};

pub use traits::{Backend, MetricsSink, SimilarityProvider};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_construct() {
        let _backend = CascaraError::backend(BackendKind::Local, "model not loaded");
        let _embedding = CascaraError::embedding("provider unreachable");
        let _config = CascaraError::Config("bad threshold".into());
        let _internal = CascaraError::Internal("unexpected".into());
        let _terminal = CascaraError::RouteFailed {
            stage: RouteStage::Attempt1,
            source: Box::new(CascaraError::backend(BackendKind::Remote, "timeout")),
        };
    }

    #[test]
    fn traits_are_object_safe() {
        fn _backend(_: &dyn Backend) {}
        fn _similarity(_: &dyn SimilarityProvider) {}
        fn _sink(_: &dyn MetricsSink) {}
    }
}
