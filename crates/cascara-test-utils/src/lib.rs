// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles shared across cascara crates.
//!
//! Scripted backends, canned similarity providers, and a failing sink,
//! so routing behavior can be tested deterministically without models,
//! embeddings, or files.

pub mod mock_backend;
pub mod mock_similarity;
pub mod mock_sink;

pub use mock_backend::{MockBackend, RecordedCall, Scripted};
pub use mock_similarity::{FailingSimilarity, FixedSimilarity};
pub use mock_sink::FailingSink;
