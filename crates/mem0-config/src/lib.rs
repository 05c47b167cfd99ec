// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Mem0 client.
//!
//! TOML files in an XDG hierarchy, `MEM0_*` environment overrides, strict
//! validation (`deny_unknown_fields` plus semantic checks) and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use mem0_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("endpoint: {}", config.api.base_url);
//! ```

use std::path::Path;

use tracing::debug;

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError, SourceFile};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ApiConfig, LoggingConfig, Mem0Config};

/// Load configuration from the XDG hierarchy and validate it.
///
/// Figment errors are converted to diagnostics with typo suggestions;
/// a successfully extracted config still has to pass
/// [`validation::validate_config`].
pub fn load_and_validate() -> Result<Mem0Config, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<Mem0Config, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![SourceFile::new(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<Mem0Config, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![SourceFile::new("<inline>", toml_content)]
    })
}

fn finish(
    loaded: Result<Mem0Config, figment::Error>,
    sources: impl FnOnce() -> Vec<SourceFile>,
) -> Result<Mem0Config, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            debug!(base_url = %config.api.base_url, "configuration loaded");
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Read the TOML files of the XDG hierarchy for error span resolution.
fn collect_toml_sources() -> Vec<SourceFile> {
    let mut candidates = vec![std::path::PathBuf::from("/etc/mem0/mem0.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("mem0/mem0.toml"));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("mem0.toml"));
    }

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| SourceFile::new(path.display().to_string(), content))
        })
        .collect()
}
