// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Difficulty estimation and routing for the Cascara engine.
//!
//! This crate provides:
//! - [`DifficultyEstimator`]: zero-cost, zero-latency query difficulty
//!   scoring from lexical and structural signals
//! - [`Router`]: the estimate → attempt → verify → repair → escalate
//!   state machine with cost and savings accounting
//!
//! The router sits between callers and the generation backends, deciding
//! per query whether the cheap local backend suffices and whether its
//! answer is good enough to return.

pub mod difficulty;
pub mod router;

pub use difficulty::DifficultyEstimator;
pub use router::{Router, RouterStats};
