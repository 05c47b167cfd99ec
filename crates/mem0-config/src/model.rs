// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Mem0 client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so that typos in
//! `mem0.toml` surface as errors instead of being silently ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default endpoint of the hosted Mem0 platform.
pub const DEFAULT_BASE_URL: &str = "https://api.mem0.ai";

/// Top-level Mem0 configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Mem0Config {
    /// Endpoint and credentials.
    #[serde(default)]
    pub api: ApiConfig,

    /// Log output settings for the command-line tool.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Endpoint, credentials and request settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the memory service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key. `None` falls back to the `MEM0_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Organization id. Must be set together with `project_id`.
    #[serde(default)]
    pub org_id: Option<String>,

    /// Project id. Must be set together with `org_id`.
    #[serde(default)]
    pub project_id: Option<String>,

    /// Overall timeout for a single request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Overrides the `User-Agent` header.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            org_id: None,
            project_id: None,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_hosted_platform() {
        let config = Mem0Config::default();
        assert_eq!(config.api.base_url, "https://api.mem0.ai");
        assert_eq!(config.api.timeout(), Duration::from_secs(300));
        assert!(config.api.api_key.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_api_section_keeps_defaults() {
        let config: Mem0Config = toml::from_str(
            r#"
[api]
base_url = "http://localhost:8000"
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 300);
    }
}
