//! Integration tests for `TwitterClient` using wiremock HTTP mocks.

use chrono::{TimeZone, Utc};
use mentionbot_sources::{SourceError, TwitterClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> TwitterClient {
    TwitterClient::with_base_url("test-bearer", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_recent_parses_tweets_and_expanded_users() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "data": [
            {
                "id": "1001",
                "text": "ansible is great for this",
                "author_id": "42",
                "created_at": "2026-08-01T10:00:00.000Z",
                "lang": "en",
                "public_metrics": {
                    "like_count": 4,
                    "retweet_count": 1,
                    "reply_count": 2,
                    "quote_count": 0
                }
            }
        ],
        "includes": {
            "users": [
                { "id": "42", "username": "alice", "name": "Alice", "verified": true }
            ]
        },
        "meta": { "result_count": 1 }
    });

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(query_param("query", "(ansible) -is:retweet lang:en"))
        .and(query_param("max_results", "100"))
        .and(query_param("expansions", "author_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let start = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 8, 2, 0, 0, 0).unwrap();
    let page = client
        .search_recent("(ansible) -is:retweet lang:en", start, end, 100)
        .await
        .expect("should parse search response");

    assert_eq!(page.tweets.len(), 1);
    assert_eq!(page.tweets[0].id.as_deref(), Some("1001"));
    let metrics = page.tweets[0].public_metrics.as_ref().unwrap();
    assert_eq!(metrics.like_count, Some(4));

    let users = page.users_by_id();
    assert_eq!(users["42"].username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn search_recent_with_no_results_returns_empty_page() {
    let server = MockServer::start().await;

    // The v2 API omits `data` entirely when nothing matched.
    let body = serde_json::json!({ "meta": { "result_count": 0 } });

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let start = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 8, 2, 0, 0, 0).unwrap();
    let page = client
        .search_recent("(nothing) -is:retweet lang:en", start, end, 100)
        .await
        .expect("empty result should still parse");

    assert!(page.tweets.is_empty());
    assert!(page.users.is_empty());
}

#[tokio::test]
async fn search_recent_surfaces_api_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let start = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 8, 2, 0, 0, 0).unwrap();
    let result = client
        .search_recent("(ansible) -is:retweet lang:en", start, end, 100)
        .await;
    assert!(
        matches!(result, Err(SourceError::Api(_))),
        "expected Api error"
    );
}
