// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! reqwest-backed [`Transport`].

use std::time::Duration;

use async_trait::async_trait;
use mem0_core::{HttpMethod, HttpRequest, HttpResponse, Mem0Error, Transport};
use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::identity::ClientIdentity;

/// `User-Agent` sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("mem0-rs/", env!("CARGO_PKG_VERSION"));

/// Sends requests over HTTP with the client's auth headers and timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport rooted at `base_url`.
    ///
    /// Default headers: `Authorization: Token <key>`, `Mem0-User-ID` (MD5 of
    /// the key), `Accept: application/json` and the user agent.
    pub fn new(
        base_url: &str,
        identity: &ClientIdentity,
        timeout: Duration,
        user_agent: Option<&str>,
    ) -> Result<Self, Mem0Error> {
        let base_url = normalize_base_url(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Token {}", identity.api_key()))
                .map_err(|e| Mem0Error::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert(
            "mem0-user-id",
            HeaderValue::from_str(&identity.user_hash())
                .map_err(|e| Mem0Error::Config(format!("invalid user id header value: {e}")))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .timeout(timeout)
            .build()
            .map_err(|e| Mem0Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    fn map_send_error(&self, err: reqwest::Error) -> Mem0Error {
        if err.is_timeout() {
            Mem0Error::Timeout {
                duration: self.timeout,
            }
        } else {
            Mem0Error::Transport {
                message: format!("HTTP request failed: {err}"),
                source: Some(Box::new(err)),
            }
        }
    }
}

/// Parse the base URL and make sure it ends in exactly one `/` so relative
/// paths join under it.
fn normalize_base_url(raw: &str) -> Result<Url, Mem0Error> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(&format!("{trimmed}/"))
        .map_err(|e| Mem0Error::Config(format!("invalid base URL {raw:?}: {e}")))
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Mem0Error> {
        let url = self
            .base_url
            .join(&request.path_and_query())
            .map_err(|e| Mem0Error::Config(format!("invalid request path {:?}: {e}", request.path)))?;

        let mut builder = self.client.request(to_reqwest_method(request.method), url);
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        debug!(status = %status, "response received");

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        // reqwest does not expose the server's reason phrase.
        Ok(HttpResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            body,
        ))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn transport(server: &MockServer) -> ReqwestTransport {
        ReqwestTransport::new(
            &server.uri(),
            &ClientIdentity::new("test-key"),
            Duration::from_secs(5),
            None,
        )
        .unwrap()
    }

    #[test]
    fn base_url_gets_single_trailing_slash() {
        let url = normalize_base_url("https://api.mem0.ai//").unwrap();
        assert_eq!(url.as_str(), "https://api.mem0.ai/");
        let nested = normalize_base_url("http://localhost:8000/api").unwrap();
        assert_eq!(
            nested.join("memories/").unwrap().as_str(),
            "http://localhost:8000/api/memories/"
        );
    }

    #[test]
    fn bad_base_url_is_config_error() {
        let err = normalize_base_url("not a url").unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn sends_default_headers() {
        let server = MockServer::start().await;
        let user_hash = ClientIdentity::new("test-key").user_hash();
        Mock::given(method("GET"))
            .and(path("/memories/"))
            .and(query_param("user_id", "alex"))
            .and(header("authorization", "Token test-key"))
            .and(header("mem0-user-id", user_hash.as_str()))
            .and(header("accept", "application/json"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport(&server)
            .send(HttpRequest::new(HttpMethod::Get, "memories/").with_query("user_id=alex".into()))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "[]");
    }

    #[tokio::test]
    async fn json_body_sets_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/batch/"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"memories": [{"memory_id": "m1"}]})))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"message":"ok"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport(&server)
            .send(
                HttpRequest::new(HttpMethod::Delete, "batch/")
                    .with_body(r#"{"memories":[{"memory_id":"m1"}]}"#.into()),
            )
            .await
            .unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn non_success_is_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/memories/missing/"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
            .mount(&server)
            .await;

        let response = transport(&server)
            .send(HttpRequest::new(HttpMethod::Get, "memories/missing/"))
            .await
            .unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.reason, "Not Found");
        assert_eq!(response.body, "not here");
    }

    #[tokio::test]
    async fn unregistered_status_has_empty_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(599).set_body_string("odd"))
            .mount(&server)
            .await;

        let response = transport(&server)
            .send(HttpRequest::new(HttpMethod::Get, "ping/"))
            .await
            .unwrap();
        assert_eq!(response.status, 599);
        assert_eq!(response.reason, "");
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(
            &server.uri(),
            &ClientIdentity::new("k"),
            Duration::from_millis(100),
            Some("custom-agent/1.0"),
        )
        .unwrap();
        let err = transport
            .send(HttpRequest::new(HttpMethod::Get, "ping/"))
            .await
            .unwrap_err();
        assert!(matches!(err, Mem0Error::Timeout { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let transport = ReqwestTransport::new(
            "http://127.0.0.1:1",
            &ClientIdentity::new("k"),
            Duration::from_secs(5),
            None,
        )
        .unwrap();
        let err = transport
            .send(HttpRequest::new(HttpMethod::Get, "ping/"))
            .await
            .unwrap_err();
        assert!(matches!(err, Mem0Error::Transport { .. }), "got: {err}");
    }
}
