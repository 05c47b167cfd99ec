// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional per-call parameters for add, list and search.

use mem0_core::{IdentityScope, Metadata};

use crate::params::ParamSet;
use crate::request::Pagination;

/// Output format requested from `add` unless overridden.
pub const DEFAULT_OUTPUT_FORMAT: &str = "v1.1";

/// API generation requested in the `add` body.
pub const ADD_API_VERSION: &str = "v2";

#[derive(Debug, Clone, PartialEq)]
pub struct AddOptions {
    pub scope: IdentityScope,
    pub metadata: Option<Metadata>,
    pub filters: Option<Metadata>,
    pub output_format: String,
}

impl Default for AddOptions {
    fn default() -> Self {
        Self {
            scope: IdentityScope::default(),
            metadata: None,
            filters: None,
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
        }
    }
}

impl AddOptions {
    pub fn for_scope(scope: IdentityScope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub(crate) fn params(&self) -> ParamSet {
        ParamSet::new()
            .scope(&self.scope)
            .set("metadata", self.metadata.clone())
            .set("filters", self.filters.clone())
            .present("output_format", self.output_format.as_str())
            .present("version", ADD_API_VERSION)
    }
}

/// Options for listing memories.
///
/// `version` is the raw version string (`""` or `"v2"`); anything else is
/// rejected when the request is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub version: String,
    pub scope: IdentityScope,
    pub top_k: Option<u32>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub metadata: Option<Metadata>,
}

impl ListOptions {
    pub fn for_scope(scope: IdentityScope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    pub fn v2(mut self) -> Self {
        self.version = "v2".to_string();
        self
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub(crate) fn params(&self) -> ParamSet {
        ParamSet::new()
            .scope(&self.scope)
            .set("top_k", self.top_k)
            .set("metadata", self.metadata.clone())
    }

    pub(crate) fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Options for the free-text search route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub version: String,
    pub scope: IdentityScope,
    pub top_k: Option<u32>,
    pub filters: Option<Metadata>,
    pub metadata: Option<Metadata>,
}

impl SearchOptions {
    pub fn for_scope(scope: IdentityScope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    pub(crate) fn params(&self) -> ParamSet {
        ParamSet::new()
            .scope(&self.scope)
            .set("top_k", self.top_k)
            .set("filters", self.filters.clone())
            .set("metadata", self.metadata.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_defaults_request_v1_1_output() {
        let params = AddOptions::for_scope(IdentityScope::user("alex"))
            .params()
            .drop_absent();
        assert_eq!(params.get("output_format").unwrap(), "v1.1");
        assert_eq!(params.get("version").unwrap(), "v2");
        assert_eq!(params.get("user_id").unwrap(), "alex");
        assert!(!params.contains_key("metadata"));
    }

    #[test]
    fn list_params_exclude_pagination() {
        let options = ListOptions::for_scope(IdentityScope::user("alex"))
            .v2()
            .with_page(2, 10);
        let params = options.params().drop_absent();
        assert!(!params.contains_key("page"));
        assert!(!params.contains_key("page_size"));
        assert_eq!(
            options.pagination(),
            Pagination {
                page: Some(2),
                page_size: Some(10)
            }
        );
    }
}
