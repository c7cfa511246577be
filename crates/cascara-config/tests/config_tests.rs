// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Cascara configuration system.

use cascara_config::diagnostic::{ConfigError, suggest_key};
use cascara_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_cascara_config() {
    let toml = r#"
[routing]
easy_threshold = 0.25
hard_threshold = 0.65
easy_max_tokens = 96
medium_max_tokens = 192
hard_max_tokens = 384
repair_multiplier = 2
escalate_easy_max_tokens = 192
escalate_medium_max_tokens = 384

[estimator]
length_cap_words = 50
hard_keywords = ["why", "prove"]
medium_keywords = ["explain"]
easy_keywords = ["define", "what is"]
hard_floor = 0.65

[verify]
uncertainty_phrases = ["i'm not sure"]
medium_relevance_floor = 0.55
hard_relevance_floor = 0.35
embed_prefix_chars = 400

[pricing]
remote_input_per_1k = 0.004
remote_output_per_1k = 0.012
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.routing.easy_threshold, 0.25);
    assert_eq!(config.routing.hard_threshold, 0.65);
    assert_eq!(config.routing.easy_max_tokens, 96);
    assert_eq!(config.estimator.length_cap_words, 50);
    assert_eq!(config.estimator.hard_keywords, vec!["why", "prove"]);
    assert_eq!(config.verify.uncertainty_phrases, vec!["i'm not sure"]);
    assert_eq!(config.verify.embed_prefix_chars, 400);
    assert_eq!(config.pricing.remote_input_per_1k, 0.004);
    assert_eq!(config.pricing.remote_output_per_1k, 0.012);
}

/// Unknown field in [routing] produces an UnknownKey diagnostic.
#[test]
fn unknown_field_in_routing_produces_error() {
    let toml = r#"
[routing]
easy_threshhold = 0.3
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown key should error");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "easy_threshhold")),
        "expected an UnknownKey error, got {errors:?}"
    );
}

/// The typo suggestion machinery proposes the intended key.
#[test]
fn typo_suggestion_for_routing_key() {
    let valid = &[
        "easy_threshold",
        "hard_threshold",
        "easy_max_tokens",
        "medium_max_tokens",
    ];
    assert_eq!(
        suggest_key("easy_threshhold", valid),
        Some("easy_threshold".to_string())
    );
}

/// A wrong-typed value produces an InvalidType diagnostic.
#[test]
fn wrong_type_produces_invalid_type_error() {
    let toml = r#"
[routing]
easy_max_tokens = "lots"
"#;

    let errors = load_and_validate_str(toml).expect_err("wrong type should error");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. })),
        "expected an InvalidType error, got {errors:?}"
    );
}

/// Semantic validation catches out-of-range values that deserialize fine.
#[test]
fn semantic_validation_rejects_bad_floors() {
    let toml = r#"
[verify]
hard_relevance_floor = 3.0
"#;

    let errors = load_and_validate_str(toml).expect_err("bad floor should error");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("hard_relevance_floor"))),
        "expected a Validation error, got {errors:?}"
    );
}

/// Defaults alone pass validation.
#[test]
fn empty_config_is_valid() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.routing.repair_multiplier, 2);
}
