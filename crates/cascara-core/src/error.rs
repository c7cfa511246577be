// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error taxonomy for the Cascara routing engine.

use thiserror::Error;

use crate::types::{BackendKind, RouteStage};

/// The primary error type used across the Cascara traits and routing core.
#[derive(Debug, Error)]
pub enum CascaraError {
    /// A generation backend failed: transport, model load, or quota.
    /// Fatal for the current attempt only; the router falls through to
    /// repair or escalation when a fallback remains.
    #[error("{backend} backend failed: {message}")]
    Backend {
        backend: BackendKind,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The similarity provider was unreachable or misbehaved. Recovered
    /// inside the verifier; never observed by callers of the router.
    #[error("embedding error: {message}")]
    Embedding {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A query failed terminally: the named stage had no fallback left.
    #[error("query failed at {stage}")]
    RouteFailed {
        stage: RouteStage,
        #[source]
        source: Box<CascaraError>,
    },

    /// Configuration errors (invalid TOML, out-of-range thresholds).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CascaraError {
    /// Shorthand for a backend failure without an underlying source.
    pub fn backend(backend: BackendKind, message: impl Into<String>) -> Self {
        CascaraError::Backend {
            backend,
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for an embedding failure without an underlying source.
    pub fn embedding(message: impl Into<String>) -> Self {
        CascaraError::Embedding {
            message: message.into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_names_backend() {
        let err = CascaraError::backend(BackendKind::Remote, "quota exceeded");
        assert_eq!(err.to_string(), "remote backend failed: quota exceeded");
    }

    #[test]
    fn route_failed_names_stage_and_chains_source() {
        use std::error::Error as _;

        let inner = CascaraError::backend(BackendKind::Remote, "connection reset");
        let err = CascaraError::RouteFailed {
            stage: RouteStage::Escalate,
            source: Box::new(inner),
        };
        assert_eq!(err.to_string(), "query failed at escalate");
        let source = err.source().expect("should chain the backend failure");
        assert!(source.to_string().contains("remote backend failed"));
    }
}
