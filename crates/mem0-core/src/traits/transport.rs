// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport trait for the HTTP boundary.
//!
//! The client core only builds [`HttpRequest`] values and interprets
//! [`HttpResponse`] values; how bytes reach the server is up to the
//! implementation (reqwest in production, a recording spy in tests).

use async_trait::async_trait;
use strum::Display;

use crate::error::Mem0Error;

/// HTTP methods used by the memory API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A fully rendered request, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Path relative to the base URL, without a leading slash (e.g. `memories/`).
    pub path: String,
    /// Percent-encoded query string without the leading `?`. Empty means none.
    pub query: String,
    /// Compact JSON body, if any.
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: String::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: String) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// Path plus query, with `?` only when the query is non-empty.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

/// Status line and body of a server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase for `status` (`"Not Found"` for 404), not the
    /// phrase the server sent. Empty for unregistered status codes.
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends rendered requests to the memory service.
///
/// Implementations attach base URL and default headers themselves.
/// Non-2xx statuses are returned as responses, not errors; only
/// connection-level failures and timeouts are `Err`.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Mem0Error>;
}
