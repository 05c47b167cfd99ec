// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Spy transport for deterministic tests.
//!
//! `RecordingTransport` implements `Transport` without any network: each
//! request is appended to a log and answered from a FIFO queue of canned
//! responses.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mem0_core::{HttpMethod, HttpRequest, HttpResponse, Mem0Error, Transport};

/// A transport that records requests and replays queued responses.
///
/// When the queue is empty it answers `200 OK` with `{}`. A stalled
/// transport records the request and then never answers, which lets tests
/// exercise cancellation.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    responses: Arc<Mutex<VecDeque<HttpResponse>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    stalled: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load the queue with JSON bodies, each answered with `200 OK`.
    pub fn with_json_responses<I, S>(bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue = bodies
            .into_iter()
            .map(|body| HttpResponse::new(200, "OK", body))
            .collect();
        Self {
            responses: Arc::new(Mutex::new(queue)),
            ..Self::default()
        }
    }

    /// A transport whose `send` never completes.
    pub fn stalled() -> Self {
        Self {
            stalled: true,
            ..Self::default()
        }
    }

    /// Add a response to the end of the queue.
    pub async fn push_response(&self, response: HttpResponse) {
        self.responses.lock().await.push_back(response);
    }

    /// Every request seen so far, in order.
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Number of recorded requests that used `method`.
    pub async fn count_method(&self, method: HttpMethod) -> usize {
        self.requests
            .lock()
            .await
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    async fn next_response(&self) -> HttpResponse {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| HttpResponse::new(200, "OK", "{}"))
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Mem0Error> {
        self.requests.lock().await.push(request);
        if self.stalled {
            std::future::pending::<()>().await;
        }
        Ok(self.next_response().await)
    }
}
