// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock generation backend for deterministic testing.
//!
//! `MockBackend` implements [`Backend`] with a FIFO script of replies and
//! failures, and records every call it receives, enabling fast,
//! CI-runnable tests without a model or a network.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use cascara_core::traits::Backend;
use cascara_core::{BackendKind, CascaraError, GenerationResult, TokenUsage};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Succeed with this text and token counts.
    Reply {
        text: String,
        input_tokens: u64,
        output_tokens: u64,
    },
    /// Raise a backend error with this message.
    Failure(String),
}

/// A call the mock received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub prompt: String,
    pub max_tokens: u32,
}

/// A mock backend that pops pre-scripted replies from a queue.
///
/// When the queue runs dry it returns a default complete sentence so
/// unscripted calls still verify cleanly.
pub struct MockBackend {
    kind: BackendKind,
    name: &'static str,
    script: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockBackend {
    pub fn local() -> Self {
        Self::new(BackendKind::Local, "mock-local")
    }

    pub fn remote() -> Self {
        Self::new(BackendKind::Remote, "mock-remote")
    }

    fn new(kind: BackendKind, name: &'static str) -> Self {
        Self {
            kind,
            name,
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a reply with default token counts (10 in, 20 out).
    pub async fn script_reply(&self, text: &str) {
        self.script_reply_with_usage(text, 10, 20).await;
    }

    /// Queue a reply with explicit token counts.
    pub async fn script_reply_with_usage(&self, text: &str, input_tokens: u64, output_tokens: u64) {
        self.script.lock().await.push_back(Scripted::Reply {
            text: text.to_string(),
            input_tokens,
            output_tokens,
        });
    }

    /// Queue a backend failure.
    pub async fn script_failure(&self, message: &str) {
        self.script
            .lock()
            .await
            .push_back(Scripted::Failure(message.to_string()));
    }

    /// Every call received so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    /// Number of generation calls received.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn name(&self) -> &str {
        self.name
    }

    async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<GenerationResult, CascaraError> {
        self.calls.lock().await.push(RecordedCall {
            prompt: prompt.to_string(),
            max_tokens,
        });

        let next = self.script.lock().await.pop_front();
        match next {
            Some(Scripted::Reply {
                text,
                input_tokens,
                output_tokens,
            }) => Ok(GenerationResult {
                text,
                usage: TokenUsage {
                    input_tokens,
                    output_tokens,
                },
                latency: Duration::from_millis(5),
                backend: self.kind,
            }),
            Some(Scripted::Failure(message)) => Err(CascaraError::backend(self.kind, message)),
            None => Ok(GenerationResult {
                text: "This is a mock response.".to_string(),
                usage: TokenUsage {
                    input_tokens: 10,
                    output_tokens: 20,
                },
                latency: Duration::from_millis(5),
                backend: self.kind,
            }),
        }
    }
}
