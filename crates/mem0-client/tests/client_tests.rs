// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests of the client against a wiremock server.

use std::time::Duration;

use mem0_client::{
    AddOptions, ApiConfig, IdentityScope, ListOptions, Mem0Client, Mem0Error, Message,
    SearchRequest,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> Mem0Client {
    Mem0Client::builder()
        .base_url(server.uri())
        .api_key("m0-test")
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client should build")
}

#[tokio::test]
async fn add_then_search_for_dinner_ideas() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/memories/"))
        .and(header("authorization", "Token m0-test"))
        .and(body_partial_json(json!({
            "user_id": "alex",
            "version": "v2",
            "output_format": "v1.1",
            "messages": [
                {"role": "user", "content": "Hi, I'm Alex. I'm a vegetarian and I'm allergic to nuts."},
                {"role": "assistant", "content": "Hello Alex! I've noted that you're a vegetarian and have a nut allergy."}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": "m1", "memory": "Is a vegetarian", "event": "ADD"},
                {"id": "m2", "memory": "Is allergic to nuts", "event": "ADD"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({
            "query": "What can I cook for dinner tonight?",
            "user_id": "alex"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "id": "m1",
                    "memory": "Is a vegetarian",
                    "user_id": "alex",
                    "score": 0.42,
                    "created_at": "2024-07-20T01:30:36.275141-07:00"
                }
            ],
            "relations": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let messages = [
        Message::user("Hi, I'm Alex. I'm a vegetarian and I'm allergic to nuts."),
        Message::assistant("Hello Alex! I've noted that you're a vegetarian and have a nut allergy."),
    ];
    let added = client
        .add(&messages, &AddOptions::for_scope(IdentityScope::user("alex")))
        .await
        .unwrap();
    assert_eq!(added.results.len(), 2);

    let found = client
        .search_memories(&SearchRequest::new("What can I cook for dinner tonight?").for_user("alex"))
        .await
        .unwrap();
    assert!(!found.results.is_empty());
    assert!(!found.results[0].content.is_empty());
    assert_eq!(found.results[0].user_id.as_deref(), Some("alex"));
}

#[tokio::test]
async fn v2_listing_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/memories/"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "10"))
        .and(body_json(json!({"user_id": "alex"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let options = ListOptions::for_scope(IdentityScope::user("alex"))
        .v2()
        .with_page(2, 10);
    let list = client(&server).get_all(&options).await.unwrap();
    assert!(list.results.is_empty());
}

#[tokio::test]
async fn delete_entities_for_user_hits_single_route() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/entities/user/alex/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .delete_entities(&IdentityScope::user("alex"))
        .await
        .unwrap();
    assert_eq!(response.message, "Entity deleted successfully.");
}

#[tokio::test]
async fn server_error_is_surfaced_with_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping/"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"detail":"Invalid API key"}"#))
        .mount(&server)
        .await;

    let err = client(&server).ping().await.unwrap_err();
    match err {
        Mem0Error::Api {
            status,
            reason,
            body,
        } => {
            assert_eq!(status, 401);
            assert_eq!(reason, "Unauthorized");
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("expected Api error, got {other}"),
    }
}

#[tokio::test]
async fn client_from_config_section() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entities/"))
        .and(query_param("org_id", "org-1"))
        .and(query_param("project_id", "proj-1"))
        .and(header("user-agent", "notes-app/0.3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": [{"type": "user", "name": "alex"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiConfig {
        base_url: format!("{}/", server.uri()),
        api_key: Some("m0-test".into()),
        org_id: Some("org-1".into()),
        project_id: Some("proj-1".into()),
        timeout_secs: 5,
        user_agent: Some("notes-app/0.3".into()),
    };
    let users = Mem0Client::from_config(&api).unwrap().users().await.unwrap();
    assert_eq!(users.results.len(), 1);
    assert_eq!(users.results[0].name, "alex");
}
