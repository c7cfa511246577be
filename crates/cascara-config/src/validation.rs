// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as threshold ordering, floor ranges, and positive
//! token budgets.

use crate::diagnostic::ConfigError;
use crate::model::CascaraConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CascaraConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let r = &config.routing;

    // Tier thresholds must be strictly ordered inside (0, 1)
    if !(r.easy_threshold > 0.0 && r.easy_threshold < r.hard_threshold && r.hard_threshold < 1.0) {
        errors.push(ConfigError::Validation {
            message: format!(
                "routing thresholds must satisfy 0 < easy < hard < 1, got easy={} hard={}",
                r.easy_threshold, r.hard_threshold
            ),
        });
    }

    for (name, budget) in [
        ("routing.easy_max_tokens", r.easy_max_tokens),
        ("routing.medium_max_tokens", r.medium_max_tokens),
        ("routing.hard_max_tokens", r.hard_max_tokens),
        ("routing.escalate_easy_max_tokens", r.escalate_easy_max_tokens),
        ("routing.escalate_medium_max_tokens", r.escalate_medium_max_tokens),
    ] {
        if budget == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{name} must be at least 1"),
            });
        }
    }

    if r.repair_multiplier < 2 {
        errors.push(ConfigError::Validation {
            message: format!(
                "routing.repair_multiplier must be at least 2, got {}",
                r.repair_multiplier
            ),
        });
    }

    let e = &config.estimator;

    if e.length_cap_words == 0 {
        errors.push(ConfigError::Validation {
            message: "estimator.length_cap_words must be at least 1".to_string(),
        });
    }

    for (name, weight) in [
        ("estimator.length_weight", e.length_weight),
        ("estimator.structure_weight", e.structure_weight),
        ("estimator.keyword_weight", e.keyword_weight),
    ] {
        if !(0.0..=1.0).contains(&weight) {
            errors.push(ConfigError::Validation {
                message: format!("{name} must be within [0, 1], got {weight}"),
            });
        }
    }

    if !(0.0..=1.0).contains(&e.hard_floor) {
        errors.push(ConfigError::Validation {
            message: format!("estimator.hard_floor must be within [0, 1], got {}", e.hard_floor),
        });
    }

    if e.hard_keywords.is_empty() {
        errors.push(ConfigError::Validation {
            message: "estimator.hard_keywords must not be empty".to_string(),
        });
    }

    if e.easy_keywords.is_empty() {
        errors.push(ConfigError::Validation {
            message: "estimator.easy_keywords must not be empty".to_string(),
        });
    }

    let v = &config.verify;

    if v.uncertainty_phrases.is_empty() {
        errors.push(ConfigError::Validation {
            message: "verify.uncertainty_phrases must not be empty".to_string(),
        });
    }

    for (name, fraction) in [
        ("verify.coverage_strong_fraction", v.coverage_strong_fraction),
        ("verify.coverage_min_fraction", v.coverage_min_fraction),
    ] {
        if !(fraction > 0.0 && fraction <= 1.0) {
            errors.push(ConfigError::Validation {
                message: format!("{name} must be within (0, 1], got {fraction}"),
            });
        }
    }

    // Similarity scores live in [-1, 1]; the hard floor must be the
    // lenient (lower) one.
    for (name, floor) in [
        ("verify.medium_relevance_floor", v.medium_relevance_floor),
        ("verify.hard_relevance_floor", v.hard_relevance_floor),
    ] {
        if !(-1.0..=1.0).contains(&floor) {
            errors.push(ConfigError::Validation {
                message: format!("{name} must be within [-1, 1], got {floor}"),
            });
        }
    }

    if v.hard_relevance_floor > v.medium_relevance_floor {
        errors.push(ConfigError::Validation {
            message: format!(
                "verify.hard_relevance_floor ({}) must not exceed verify.medium_relevance_floor ({})",
                v.hard_relevance_floor, v.medium_relevance_floor
            ),
        });
    }

    if v.embed_prefix_chars == 0 {
        errors.push(ConfigError::Validation {
            message: "verify.embed_prefix_chars must be at least 1".to_string(),
        });
    }

    let p = &config.pricing;

    if p.remote_input_per_1k < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "pricing.remote_input_per_1k must be non-negative, got {}",
                p.remote_input_per_1k
            ),
        });
    }

    if p.remote_output_per_1k < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "pricing.remote_output_per_1k must be non-negative, got {}",
                p.remote_output_per_1k
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&CascaraConfig::default()).is_ok());
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let mut config = CascaraConfig::default();
        config.routing.easy_threshold = 0.7;
        config.routing.hard_threshold = 0.4;
        let errors = validate_config(&config).expect_err("should reject");
        assert!(errors.iter().any(|e| e.to_string().contains("thresholds")));
    }

    #[test]
    fn collects_all_errors_not_fail_fast() {
        let mut config = CascaraConfig::default();
        config.routing.easy_max_tokens = 0;
        config.routing.repair_multiplier = 1;
        config.pricing.remote_input_per_1k = -1.0;
        let errors = validate_config(&config).expect_err("should reject");
        assert!(errors.len() >= 3, "expected 3+ errors, got {}", errors.len());
    }

    #[test]
    fn hard_floor_above_medium_floor_rejected() {
        let mut config = CascaraConfig::default();
        config.verify.hard_relevance_floor = 0.9;
        let errors = validate_config(&config).expect_err("should reject");
        assert!(
            errors
                .iter()
                .any(|e| e.to_string().contains("hard_relevance_floor"))
        );
    }
}
