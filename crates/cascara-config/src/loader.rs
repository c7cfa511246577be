// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./cascara.toml` > `~/.config/cascara/cascara.toml`
//! > `/etc/cascara/cascara.toml` with environment variable overrides via the
//! `CASCARA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CascaraConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/cascara/cascara.toml` (system-wide)
/// 3. `~/.config/cascara/cascara.toml` (user XDG config)
/// 4. `./cascara.toml` (local directory)
/// 5. `CASCARA_*` environment variables
pub fn load_config() -> Result<CascaraConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<CascaraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CascaraConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CascaraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CascaraConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for
/// diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CascaraConfig::default()))
        .merge(Toml::file("/etc/cascara/cascara.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("cascara/cascara.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("cascara.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `CASCARA_ROUTING_EASY_MAX_TOKENS` must
/// map to `routing.easy_max_tokens`, not `routing.easy.max.tokens`.
fn env_provider() -> Env {
    Env::prefixed("CASCARA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("routing_", "routing.", 1)
            .replacen("estimator_", "estimator.", 1)
            .replacen("verify_", "verify.", 1)
            .replacen("pricing_", "pricing.", 1);
        mapped.into()
    })
}
