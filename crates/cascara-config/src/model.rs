// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Cascara routing engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Cascara configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CascaraConfig {
    /// Routing thresholds and per-tier token budgets.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Difficulty estimator weights and lexicons.
    #[serde(default)]
    pub estimator: EstimatorConfig,

    /// Response verification phrase lists and relevance floors.
    #[serde(default)]
    pub verify: VerifyConfig,

    /// Per-1K-token rates for cost accounting.
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// Routing thresholds and token budgets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Difficulty score below which a query is Easy.
    #[serde(default = "default_easy_threshold")]
    pub easy_threshold: f64,

    /// Difficulty score at or above which a query is Hard.
    #[serde(default = "default_hard_threshold")]
    pub hard_threshold: f64,

    /// Token budget for Easy-tier local attempts.
    #[serde(default = "default_easy_max_tokens")]
    pub easy_max_tokens: u32,

    /// Token budget for Medium-tier local attempts.
    #[serde(default = "default_medium_max_tokens")]
    pub medium_max_tokens: u32,

    /// Token budget for the direct remote call on Hard queries.
    #[serde(default = "default_hard_max_tokens")]
    pub hard_max_tokens: u32,

    /// Budget multiplier for the same-backend repair retry.
    #[serde(default = "default_repair_multiplier")]
    pub repair_multiplier: u32,

    /// Token budget for remote escalation of an Easy query.
    #[serde(default = "default_escalate_easy_max_tokens")]
    pub escalate_easy_max_tokens: u32,

    /// Token budget for remote escalation of a Medium query.
    #[serde(default = "default_escalate_medium_max_tokens")]
    pub escalate_medium_max_tokens: u32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            easy_threshold: default_easy_threshold(),
            hard_threshold: default_hard_threshold(),
            easy_max_tokens: default_easy_max_tokens(),
            medium_max_tokens: default_medium_max_tokens(),
            hard_max_tokens: default_hard_max_tokens(),
            repair_multiplier: default_repair_multiplier(),
            escalate_easy_max_tokens: default_escalate_easy_max_tokens(),
            escalate_medium_max_tokens: default_escalate_medium_max_tokens(),
        }
    }
}

fn default_easy_threshold() -> f64 {
    0.3
}

fn default_hard_threshold() -> f64 {
    0.6
}

fn default_easy_max_tokens() -> u32 {
    128
}

fn default_medium_max_tokens() -> u32 {
    256
}

fn default_hard_max_tokens() -> u32 {
    512
}

fn default_repair_multiplier() -> u32 {
    2
}

fn default_escalate_easy_max_tokens() -> u32 {
    256
}

fn default_escalate_medium_max_tokens() -> u32 {
    512
}

/// Difficulty estimator weights and lexicons.
///
/// Hard-signal keywords floor the final score at `hard_floor` whenever one
/// is present; medium-signal keywords add positive keyword weight without
/// triggering the floor; easy-signal keywords subtract.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Word count at which the length term saturates to 1.0.
    #[serde(default = "default_length_cap_words")]
    pub length_cap_words: usize,

    /// Weight of the normalized length term.
    #[serde(default = "default_length_weight")]
    pub length_weight: f64,

    /// Weight of the clause/sub-question structure term.
    #[serde(default = "default_structure_weight")]
    pub structure_weight: f64,

    /// Weight of the keyword lexicon term.
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,

    /// Words whose presence floors the score at `hard_floor`.
    #[serde(default = "default_hard_keywords")]
    pub hard_keywords: Vec<String>,

    /// Words that raise the keyword term without flooring the score.
    #[serde(default = "default_medium_keywords")]
    pub medium_keywords: Vec<String>,

    /// Words and phrases that lower the keyword term.
    #[serde(default = "default_easy_keywords")]
    pub easy_keywords: Vec<String>,

    /// Minimum final score when any hard-signal keyword is present.
    #[serde(default = "default_hard_floor")]
    pub hard_floor: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            length_cap_words: default_length_cap_words(),
            length_weight: default_length_weight(),
            structure_weight: default_structure_weight(),
            keyword_weight: default_keyword_weight(),
            hard_keywords: default_hard_keywords(),
            medium_keywords: default_medium_keywords(),
            easy_keywords: default_easy_keywords(),
            hard_floor: default_hard_floor(),
        }
    }
}

fn default_length_cap_words() -> usize {
    60
}

fn default_length_weight() -> f64 {
    0.3
}

fn default_structure_weight() -> f64 {
    0.3
}

fn default_keyword_weight() -> f64 {
    0.4
}

fn default_hard_keywords() -> Vec<String> {
    ["why", "prove", "analyze", "derive", "justify", "evaluate"]
        .map(String::from)
        .to_vec()
}

fn default_medium_keywords() -> Vec<String> {
    ["explain", "how", "compare", "describe", "discuss", "summarize"]
        .map(String::from)
        .to_vec()
}

fn default_easy_keywords() -> Vec<String> {
    ["define", "list", "name", "what is", "who is", "when is"]
        .map(String::from)
        .to_vec()
}

fn default_hard_floor() -> f64 {
    0.6
}

/// Response verification phrase lists and relevance floors.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyConfig {
    /// Hedging phrases that mark an answer as uncertain (case-insensitive
    /// substring match).
    #[serde(default = "default_uncertainty_phrases")]
    pub uncertainty_phrases: Vec<String>,

    /// Salient-term coverage at or above which relevance is accepted
    /// without consulting the similarity provider.
    #[serde(default = "default_coverage_strong_fraction")]
    pub coverage_strong_fraction: f64,

    /// Minimum coverage for the lexical-only fallback when the similarity
    /// provider is down on a Hard query.
    #[serde(default = "default_coverage_min_fraction")]
    pub coverage_min_fraction: f64,

    /// Similarity below this on a Medium query is logged but never fails
    /// the answer (advisory only).
    #[serde(default = "default_medium_relevance_floor")]
    pub medium_relevance_floor: f64,

    /// Similarity below this on a Hard query fails the answer. Lower than
    /// the medium floor: proofs and analyses legitimately drift from the
    /// prompt's wording.
    #[serde(default = "default_hard_relevance_floor")]
    pub hard_relevance_floor: f64,

    /// Only this many leading characters of the answer are sent to the
    /// similarity provider.
    #[serde(default = "default_embed_prefix_chars")]
    pub embed_prefix_chars: usize,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            uncertainty_phrases: default_uncertainty_phrases(),
            coverage_strong_fraction: default_coverage_strong_fraction(),
            coverage_min_fraction: default_coverage_min_fraction(),
            medium_relevance_floor: default_medium_relevance_floor(),
            hard_relevance_floor: default_hard_relevance_floor(),
            embed_prefix_chars: default_embed_prefix_chars(),
        }
    }
}

fn default_uncertainty_phrases() -> Vec<String> {
    [
        "i'm not sure",
        "i am not sure",
        "i don't know",
        "cannot determine",
        "not enough information",
        "unclear",
        "it depends",
    ]
    .map(String::from)
    .to_vec()
}

fn default_coverage_strong_fraction() -> f64 {
    0.6
}

fn default_coverage_min_fraction() -> f64 {
    0.34
}

fn default_medium_relevance_floor() -> f64 {
    0.60
}

fn default_hard_relevance_floor() -> f64 {
    0.40
}

fn default_embed_prefix_chars() -> usize {
    500
}

/// Per-1K-token rates in USD. Local inference is pinned at zero cost.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Remote rate per 1K input tokens.
    #[serde(default = "default_remote_input_per_1k")]
    pub remote_input_per_1k: f64,

    /// Remote rate per 1K output tokens.
    #[serde(default = "default_remote_output_per_1k")]
    pub remote_output_per_1k: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            remote_input_per_1k: default_remote_input_per_1k(),
            remote_output_per_1k: default_remote_output_per_1k(),
        }
    }
}

fn default_remote_input_per_1k() -> f64 {
    0.005
}

fn default_remote_output_per_1k() -> f64 {
    0.015
}
