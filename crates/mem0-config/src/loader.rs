// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./mem0.toml` > `~/.config/mem0/mem0.toml` > `/etc/mem0/mem0.toml`
//! with environment variable overrides via the `MEM0_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::Mem0Config;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/mem0/mem0.toml` (system-wide)
/// 3. `~/.config/mem0/mem0.toml` (user XDG config)
/// 4. `./mem0.toml` (local directory)
/// 5. `MEM0_*` environment variables
pub fn load_config() -> Result<Mem0Config, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<Mem0Config, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(Mem0Config::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<Mem0Config, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(Mem0Config::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for XDG config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Mem0Config::default()))
        .merge(Toml::file("/etc/mem0/mem0.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("mem0/mem0.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("mem0.toml"))
        .merge(env_provider())
}

/// Map a prefix-stripped env var name onto a dotted config key.
///
/// figment hands over the name in its original case. `API_KEY` maps to
/// `api.api_key`; other names map `<section>_<field>` to `<section>.<field>`
/// on the section prefix only, so `API_BASE_URL` becomes `api.base_url`.
/// Names outside the `api` and `logging` sections map to `None`.
pub(crate) fn env_key(key: &str) -> Option<String> {
    let key = key.to_ascii_lowercase();
    if key == "api_key" {
        return Some("api.api_key".to_string());
    }
    if let Some(field) = key.strip_prefix("api_") {
        Some(format!("api.{field}"))
    } else {
        key.strip_prefix("logging_")
            .map(|field| format!("logging.{field}"))
    }
}

/// Only `MEM0_API_*` and `MEM0_LOGGING_*` are read; unrelated `MEM0_`
/// variables would otherwise trip `deny_unknown_fields`.
fn env_provider() -> Env {
    Env::prefixed("MEM0_").filter_map(|key| env_key(key.as_str()).map(Into::into))
}
