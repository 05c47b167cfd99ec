// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-wide identity: API key plus the optional org/project pair.

use std::fmt;

use md5::{Digest, Md5};
use mem0_core::Mem0Error;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "MEM0_API_KEY";

/// Credentials and tenancy bound to a client at construction.
///
/// Immutable once built; the normalizer borrows it for every call.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    api_key: String,
    org_id: Option<String>,
    project_id: Option<String>,
}

impl ClientIdentity {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            org_id: None,
            project_id: None,
        }
    }

    /// Resolve the API key from `api_key` or, failing that, [`API_KEY_ENV`].
    pub fn resolve(api_key: Option<String>) -> Result<Self, Mem0Error> {
        api_key
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
            .map(Self::new)
            .ok_or_else(|| {
                Mem0Error::Config(format!(
                    "Mem0 API key not provided: pass one explicitly or set {API_KEY_ENV}"
                ))
            })
    }

    pub fn with_org_id(mut self, org_id: Option<String>) -> Self {
        self.org_id = org_id;
        self
    }

    pub fn with_project_id(mut self, project_id: Option<String>) -> Self {
        self.project_id = project_id;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The org/project pair if both are set, `None` if neither is.
    ///
    /// Empty strings count as unset. Exactly one of the two set is a
    /// configuration error.
    pub fn org_project(&self) -> Result<Option<(&str, &str)>, Mem0Error> {
        let org = self.org_id.as_deref().filter(|s| !s.is_empty());
        let project = self.project_id.as_deref().filter(|s| !s.is_empty());
        match (org, project) {
            (Some(org), Some(project)) => Ok(Some((org, project))),
            (None, None) => Ok(None),
            _ => Err(Mem0Error::Config(
                "please provide both org_id and project_id".to_string(),
            )),
        }
    }

    /// Lowercase hex MD5 of the API key, sent as the `Mem0-User-ID` header.
    pub fn user_hash(&self) -> String {
        hex::encode(Md5::digest(self.api_key.as_bytes()))
    }
}

impl fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("api_key", &"[REDACTED]")
            .field("org_id", &self.org_id)
            .field("project_id", &self.project_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn pairing_rules() {
        let base = ClientIdentity::new("k");
        assert_eq!(base.org_project().unwrap(), None);

        let both = base
            .clone()
            .with_org_id(Some("o".into()))
            .with_project_id(Some("p".into()));
        assert_eq!(both.org_project().unwrap(), Some(("o", "p")));

        let org_only = base.clone().with_org_id(Some("o".into()));
        assert!(org_only.org_project().unwrap_err().is_configuration());

        let project_only = base.clone().with_project_id(Some("p".into()));
        assert!(project_only.org_project().unwrap_err().is_configuration());

        let empty_org = base.with_org_id(Some(String::new()));
        assert_eq!(empty_org.org_project().unwrap(), None);
    }

    #[test]
    fn user_hash_is_md5_hex_of_key() {
        // md5("abc")
        assert_eq!(
            ClientIdentity::new("abc").user_hash(),
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn debug_never_prints_the_key() {
        let rendered = format!("{:?}", ClientIdentity::new("m0-secret"));
        assert!(!rendered.contains("m0-secret"));
    }

    #[test]
    #[serial]
    fn explicit_key_wins_over_env() {
        // SAFETY: serialized with every other env-mutating test in this crate.
        unsafe { std::env::set_var(API_KEY_ENV, "from-env") };
        let identity = ClientIdentity::resolve(Some("explicit".into()));
        unsafe { std::env::remove_var(API_KEY_ENV) };
        assert_eq!(identity.unwrap().api_key(), "explicit");
    }

    #[test]
    #[serial]
    fn env_key_is_the_fallback() {
        unsafe { std::env::set_var(API_KEY_ENV, "from-env") };
        let identity = ClientIdentity::resolve(None);
        unsafe { std::env::remove_var(API_KEY_ENV) };
        assert_eq!(identity.unwrap().api_key(), "from-env");
    }

    #[test]
    #[serial]
    fn missing_key_everywhere_is_a_config_error() {
        unsafe { std::env::remove_var(API_KEY_ENV) };
        let err = ClientIdentity::resolve(None).unwrap_err();
        assert!(err.is_configuration(), "got: {err}");
    }
}
