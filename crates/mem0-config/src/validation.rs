// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde cannot express: URL scheme, timeout
//! range, the org/project pairing and the log level name.

use crate::diagnostic::ConfigError;
use crate::model::Mem0Config;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &Mem0Config) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("api.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    let has_org = config.api.org_id.as_deref().is_some_and(|s| !s.is_empty());
    let has_project = config
        .api
        .project_id
        .as_deref()
        .is_some_and(|s| !s.is_empty());
    if has_org != has_project {
        errors.push(ConfigError::Validation {
            message: "api.org_id and api.project_id must be set together".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&Mem0Config::default()).is_ok());
    }

    #[test]
    fn lone_org_id_fails_validation() {
        let mut config = Mem0Config::default();
        config.api.org_id = Some("org-1".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "set together"));
    }

    #[test]
    fn lone_project_id_fails_validation() {
        let mut config = Mem0Config::default();
        config.api.project_id = Some("proj-1".into());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn paired_org_and_project_pass() {
        let mut config = Mem0Config::default();
        config.api.org_id = Some("org-1".into());
        config.api.project_id = Some("proj-1".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let mut config = Mem0Config::default();
        config.api.org_id = Some(String::new());
        config.api.project_id = None;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_scheme_and_zero_timeout_are_both_reported() {
        let mut config = Mem0Config::default();
        config.api.base_url = "ftp://example.com".into();
        config.api.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(has_message(&errors, "base_url"));
        assert!(has_message(&errors, "timeout_secs"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = Mem0Config::default();
        config.logging.level = "loud".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "logging.level"));
    }
}
