// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend rate tables and cost calculation.
//!
//! Rates are USD per 1K tokens, taken from configuration. Local inference
//! is pinned at (0, 0): it costs electricity, not dollars, and the routing
//! policy's whole point is that local attempts are free to retry.

use cascara_config::model::PricingConfig;
use cascara_core::types::{BackendKind, GenerationResult, TokenUsage};

/// Per-backend pricing in USD per 1K tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackendRates {
    /// Cost per 1K input tokens.
    pub input_per_1k: f64,
    /// Cost per 1K output tokens.
    pub output_per_1k: f64,
}

impl BackendRates {
    /// The zero rate used for local inference.
    pub const FREE: BackendRates = BackendRates {
        input_per_1k: 0.0,
        output_per_1k: 0.0,
    };
}

/// Static table mapping backend identity to its per-1K rates.
#[derive(Debug, Clone)]
pub struct CostModel {
    remote: BackendRates,
}

impl CostModel {
    /// Build the cost model from the `[pricing]` config section.
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            remote: BackendRates {
                input_per_1k: config.remote_input_per_1k,
                output_per_1k: config.remote_output_per_1k,
            },
        }
    }

    /// Rates for the given backend. Local is always free.
    pub fn rates(&self, backend: BackendKind) -> BackendRates {
        match backend {
            BackendKind::Local => BackendRates::FREE,
            BackendKind::Remote => self.remote,
        }
    }

    /// USD cost of one generation attempt at its own backend's rates.
    pub fn attempt_cost(&self, attempt: &GenerationResult) -> f64 {
        calculate_cost(&attempt.usage, &self.rates(attempt.backend))
    }

    /// Actual spend across every attempt made for one query.
    pub fn decision_cost(&self, attempts: &[GenerationResult]) -> f64 {
        attempts.iter().map(|a| self.attempt_cost(a)).sum()
    }

    /// Cost of a hypothetical always-remote baseline: the same token
    /// counts, all priced at remote rates.
    pub fn baseline_remote_cost(&self, attempts: &[GenerationResult]) -> f64 {
        attempts
            .iter()
            .map(|a| calculate_cost(&a.usage, &self.remote))
            .sum()
    }

    /// Savings versus the always-remote baseline. Zero when every attempt
    /// already went to the remote backend.
    pub fn savings(&self, attempts: &[GenerationResult]) -> f64 {
        self.baseline_remote_cost(attempts) - self.decision_cost(attempts)
    }
}

/// Calculate cost in USD for a given token usage and rate pair.
///
/// Formula: `(input / 1000) * input_rate + (output / 1000) * output_rate`.
pub fn calculate_cost(usage: &TokenUsage, rates: &BackendRates) -> f64 {
    let input = (usage.input_tokens as f64 / 1000.0) * rates.input_per_1k;
    let output = (usage.output_tokens as f64 / 1000.0) * rates.output_per_1k;
    input + output
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn model() -> CostModel {
        CostModel::new(&PricingConfig::default())
    }

    fn attempt(backend: BackendKind, input: u64, output: u64) -> GenerationResult {
        GenerationResult {
            text: String::new(),
            usage: TokenUsage {
                input_tokens: input,
                output_tokens: output,
            },
            latency: Duration::from_millis(1),
            backend,
        }
    }

    #[test]
    fn local_rates_are_zero() {
        let rates = model().rates(BackendKind::Local);
        assert_eq!(rates, BackendRates::FREE);
    }

    #[test]
    fn remote_attempt_cost_uses_published_rates() {
        let m = model();
        let cost = m.attempt_cost(&attempt(BackendKind::Remote, 1000, 500));
        // input: 1000/1K * 0.005 = 0.005
        // output: 500/1K * 0.015 = 0.0075
        let expected = 0.005 + 0.0075;
        assert!((cost - expected).abs() < 1e-12, "expected {expected}, got {cost}");
    }

    #[test]
    fn local_attempt_costs_nothing() {
        let m = model();
        assert_eq!(m.attempt_cost(&attempt(BackendKind::Local, 10_000, 10_000)), 0.0);
    }

    #[test]
    fn savings_prices_local_tokens_at_remote_rates() {
        let m = model();
        let attempts = vec![attempt(BackendKind::Local, 1000, 1000)];
        // baseline = 0.005 + 0.015 = 0.020, actual = 0
        assert!((m.savings(&attempts) - 0.020).abs() < 1e-12);
    }

    #[test]
    fn escalated_decision_still_credits_local_attempts() {
        let m = model();
        let attempts = vec![
            attempt(BackendKind::Local, 100, 100),
            attempt(BackendKind::Local, 100, 200),
            attempt(BackendKind::Remote, 100, 300),
        ];
        let actual = m.decision_cost(&attempts);
        let baseline = m.baseline_remote_cost(&attempts);
        let savings = m.savings(&attempts);
        // Only the remote attempt costs money.
        assert!((actual - (0.1 * 0.005 + 0.3 * 0.015)).abs() < 1e-12);
        assert!(baseline > actual);
        assert!(savings > 0.0, "local attempts keep their baseline credit");
        assert!((savings - (baseline - actual)).abs() < 1e-12);
    }

    #[test]
    fn all_remote_decision_saves_nothing() {
        let m = model();
        let attempts = vec![attempt(BackendKind::Remote, 500, 500)];
        assert!((m.savings(&attempts) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_tokens_zero_cost() {
        let m = model();
        assert_eq!(m.decision_cost(&[attempt(BackendKind::Remote, 0, 0)]), 0.0);
    }
}
