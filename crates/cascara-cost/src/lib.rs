// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cost accounting for the Cascara routing engine.
//!
//! Pure computations over already-collected token counts: per-backend rate
//! tables, per-decision spend, and savings versus an always-remote
//! baseline. No side effects; the router stamps the results onto each
//! [`cascara_core::RoutingDecision`].

pub mod pricing;

pub use pricing::{BackendRates, CostModel, calculate_cost};
