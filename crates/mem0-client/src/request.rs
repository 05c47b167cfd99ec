// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request builder: renders normalized parameters and resolves paths.

use std::str::FromStr;

use mem0_core::{Entity, HttpMethod, HttpRequest, Mem0Error};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

use crate::params::{NormalizedParams, ParamSet};

/// Everything except RFC 3986 unreserved characters gets percent-encoded.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a query component or a single path segment.
pub fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, UNRESERVED).to_string()
}

/// String form of a parameter value for the query string.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `k=v&k=v`, both sides encoded. Empty mapping renders as the empty string.
pub fn query_string(params: &NormalizedParams) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(&value_text(value))))
        .collect::<Vec<_>>()
        .join("&")
}

/// Compact JSON object of the mapping.
pub fn json_body(params: &NormalizedParams) -> Result<String, Mem0Error> {
    Ok(serde_json::to_string(&params.to_object_with(None))?)
}

/// Where a normalized mapping ends up on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    QueryString,
    JsonBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    QueryString(String),
    JsonBody(String),
}

pub fn render(params: &NormalizedParams, target: RenderTarget) -> Result<Rendered, Mem0Error> {
    match target {
        RenderTarget::QueryString => Ok(Rendered::QueryString(query_string(params))),
        RenderTarget::JsonBody => json_body(params).map(Rendered::JsonBody),
    }
}

/// A request to `path` carrying `params` wherever `target` puts them.
pub fn build(
    method: HttpMethod,
    path: impl Into<String>,
    params: &NormalizedParams,
    target: RenderTarget,
) -> Result<HttpRequest, Mem0Error> {
    let request = HttpRequest::new(method, path);
    Ok(match render(params, target)? {
        Rendered::QueryString(query) => request.with_query(query),
        Rendered::JsonBody(body) => request.with_body(body),
    })
}

/// API generation selected by a version string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiVersion {
    /// Version string `""`: query-string `GET` listing.
    #[default]
    V1,
    /// Version string `"v2"`: JSON-body `POST` listing.
    V2,
}

impl ApiVersion {
    /// Path prefix for versioned routes.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::V1 => "",
            Self::V2 => "v2/",
        }
    }
}

impl FromStr for ApiVersion {
    type Err = Mem0Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::V1),
            "v2" => Ok(Self::V2),
            other => Err(Mem0Error::UnsupportedVersion(other.to_string())),
        }
    }
}

/// Page selection for the v2 listing. Ignored by v1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl Pagination {
    fn query(&self) -> String {
        let params = ParamSet::new()
            .set("page", self.page)
            .set("page_size", self.page_size)
            .drop_absent();
        query_string(&params)
    }
}

/// Build the list-memories request for `version`.
pub fn list_memories(
    version: ApiVersion,
    params: &NormalizedParams,
    pagination: Pagination,
) -> Result<HttpRequest, Mem0Error> {
    match version {
        ApiVersion::V1 => list_memories_v1(params),
        ApiVersion::V2 => list_memories_v2(params, pagination),
    }
}

fn list_memories_v1(params: &NormalizedParams) -> Result<HttpRequest, Mem0Error> {
    query_request(HttpMethod::Get, "memories/", params)
}

fn list_memories_v2(
    params: &NormalizedParams,
    pagination: Pagination,
) -> Result<HttpRequest, Mem0Error> {
    Ok(body_request(HttpMethod::Post, "v2/memories/", params)?.with_query(pagination.query()))
}

/// `POST {prefix}memories/search/` with `query` merged over the params.
pub fn search(
    version: ApiVersion,
    query: &str,
    params: &NormalizedParams,
) -> Result<HttpRequest, Mem0Error> {
    let path = format!("{}memories/search/", version.prefix());
    body_request_with(HttpMethod::Post, path, params, "query", Value::from(query))
}

/// Parameters go into the query string; no body.
pub fn query_request(
    method: HttpMethod,
    path: impl Into<String>,
    params: &NormalizedParams,
) -> Result<HttpRequest, Mem0Error> {
    build(method, path, params, RenderTarget::QueryString)
}

/// Parameters go into a JSON body; no query string.
pub fn body_request(
    method: HttpMethod,
    path: impl Into<String>,
    params: &NormalizedParams,
) -> Result<HttpRequest, Mem0Error> {
    build(method, path, params, RenderTarget::JsonBody)
}

/// Like [`body_request`], but `key` is set to `value` after the params so
/// it cannot be overwritten.
pub fn body_request_with(
    method: HttpMethod,
    path: impl Into<String>,
    params: &NormalizedParams,
    key: &str,
    value: Value,
) -> Result<HttpRequest, Mem0Error> {
    let body = serde_json::to_string(&params.to_object_with(Some((key, value))))?;
    Ok(HttpRequest::new(method, path).with_body(body))
}

/// Encode one caller-supplied path segment.
///
/// Empty, `.` and `..` are rejected: URL resolution would collapse them onto
/// the parent collection route (`memories/./` is `memories/`), and `%2e`
/// is normalized the same way.
fn path_segment(what: &str, raw: &str) -> Result<String, Mem0Error> {
    if matches!(raw, "" | "." | "..") {
        return Err(Mem0Error::Validation(format!(
            "{what} must not be empty, \".\" or \"..\", got {raw:?}"
        )));
    }
    Ok(encode(raw))
}

/// `memories/{id}/`
pub fn memory_path(memory_id: &str) -> Result<String, Mem0Error> {
    Ok(format!("memories/{}/", path_segment("memory id", memory_id)?))
}

/// `memories/{id}/history/`
pub fn memory_history_path(memory_id: &str) -> Result<String, Mem0Error> {
    Ok(format!(
        "memories/{}/history/",
        path_segment("memory id", memory_id)?
    ))
}

/// `entities/{type}/{name}/`
pub fn entity_path(entity: &Entity) -> Result<String, Mem0Error> {
    Ok(format!(
        "entities/{}/{}/",
        entity.entity_type,
        path_segment("entity name", &entity.name)?
    ))
}
