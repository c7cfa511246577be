// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation backend trait for inference engines (local GGUF, remote API).

use async_trait::async_trait;

use crate::error::CascaraError;
use crate::types::{BackendKind, GenerationResult};

/// A text-generation backend.
///
/// Implementations either return a complete [`GenerationResult`] or a
/// [`CascaraError::Backend`]; partial or garbage output is never returned
/// silently. Transport timeouts and retries are the implementation's
/// concern, not the router's.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Stable identity used for cost attribution and routing invariants.
    fn kind(&self) -> BackendKind;

    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// Generate a completion for `prompt`, bounded by `max_tokens`.
    async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<GenerationResult, CascaraError>;
}
