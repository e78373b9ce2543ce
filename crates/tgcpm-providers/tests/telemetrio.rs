//! Integration tests for `TelemetrioClient` using wiremock HTTP mocks.

use tgcpm_core::ProviderKind;
use tgcpm_providers::{ChannelProvider, TelemetrioClient};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> TelemetrioClient {
    TelemetrioClient::with_base_url("test-key", 30, 0, 0, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_merges_info_and_stats() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channel/info"))
        .and(header("x-api-key", "test-key"))
        .and(query_param("handle", "cryptodaily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "Crypto Daily",
            "description": "Market moves every morning",
            "verified": true
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/channel/stats"))
        .and(query_param("handle", "cryptodaily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "participants_count": 24300,
            "avg_views": 11200.0,
            "posts_last_week": 14
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert_eq!(client.kind(), ProviderKind::Telemetrio);

    let partial = client
        .fetch("cryptodaily")
        .await
        .expect("fetch should succeed")
        .expect("channel should be found");

    assert_eq!(partial.title.as_deref(), Some("Crypto Daily"));
    assert_eq!(partial.subscribers, Some(24_300));
    assert_eq!(partial.avg_views, Some(11_200.0));
    assert_eq!(partial.verified, Some(true));
    assert_eq!(partial.posts_per_day, Some(2.0));
}

#[tokio::test]
async fn both_endpoints_404_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch("ghostchannel").await.expect("404 is not an error");
    assert!(result.is_none(), "both endpoints 404 should mean unknown channel");
}

#[tokio::test]
async fn one_endpoint_404_still_returns_partial() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channel/info"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/channel/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subscribers": "1,500"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let partial = client
        .fetch("partial")
        .await
        .expect("fetch should succeed")
        .expect("stats endpoint alone should suffice");

    assert_eq!(partial.subscribers, Some(1500));
    assert_eq!(partial.title, None, "missing fields stay unknown");
}

#[tokio::test]
async fn rejected_api_key_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch("any").await.expect_err("401 must surface");
    assert!(
        err.to_string().contains("rejected"),
        "expected auth error, got: {err}"
    );
}
