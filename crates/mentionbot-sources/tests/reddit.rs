//! Integration tests for `RedditClient` using wiremock HTTP mocks.

use mentionbot_core::RedditCredentials;
use mentionbot_sources::{RedditClient, SourceError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_creds() -> RedditCredentials {
    RedditCredentials {
        client_id: "test-id".to_string(),
        client_secret: "test-secret".to_string(),
        user_agent: "mentionbot-test/0.1".to_string(),
    }
}

async fn mount_token_mock(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "access_token": "test-token" })),
        )
        .mount(server)
        .await;
}

async fn test_client(server: &MockServer) -> RedditClient {
    RedditClient::connect_with_base_urls(&test_creds(), 30, &server.uri(), &server.uri())
        .await
        .expect("client construction should not fail")
}

#[tokio::test]
async fn connect_exchanges_credentials_for_token() {
    let server = MockServer::start().await;
    mount_token_mock(&server).await;

    test_client(&server).await;
}

#[tokio::test]
async fn connect_surfaces_rejected_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result =
        RedditClient::connect_with_base_urls(&test_creds(), 30, &server.uri(), &server.uri())
            .await;
    assert!(
        matches!(result, Err(SourceError::Auth(_))),
        "expected Auth error"
    );
}

#[tokio::test]
async fn fetch_new_posts_parses_listing() {
    let server = MockServer::start().await;
    mount_token_mock(&server).await;

    let body = serde_json::json!({
        "kind": "Listing",
        "data": {
            "children": [
                {
                    "kind": "t3",
                    "data": {
                        "id": "abc123",
                        "title": "Deploying with Ansible",
                        "selftext": "It went great",
                        "author": "alice",
                        "subreddit": "devops",
                        "permalink": "/r/devops/comments/abc123/deploying/",
                        "score": 42,
                        "num_comments": 7,
                        "created_utc": 1_770_000_000.0,
                        "upvote_ratio": 0.97,
                        "stickied": false
                    }
                },
                {
                    "kind": "t3",
                    "data": {
                        "id": "def456",
                        "title": "Bare minimum post"
                    }
                }
            ],
            "after": null
        }
    });

    Mock::given(method("GET"))
        .and(path("/r/devops/new"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let posts = client
        .fetch_new_posts("devops", 100)
        .await
        .expect("should parse listing");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id.as_deref(), Some("abc123"));
    assert_eq!(posts[0].score, Some(42));
    assert_eq!(posts[0].num_comments, Some(7));
    assert!(posts[0].created_at().is_some());
    // The sparse record still deserializes, with absent fields as None.
    assert_eq!(posts[1].id.as_deref(), Some("def456"));
    assert!(posts[1].score.is_none());
    assert!(posts[1].created_at().is_none());
}

#[tokio::test]
async fn fetch_new_posts_surfaces_api_failure() {
    let server = MockServer::start().await;
    mount_token_mock(&server).await;

    Mock::given(method("GET"))
        .and(path("/r/devops/new"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let result = client.fetch_new_posts("devops", 100).await;
    assert!(
        matches!(result, Err(SourceError::Api(_))),
        "expected Api error"
    );
}

#[tokio::test]
async fn fetch_comments_skips_placeholder_children() {
    let server = MockServer::start().await;
    mount_token_mock(&server).await;

    let body = serde_json::json!([
        {
            "kind": "Listing",
            "data": { "children": [ { "kind": "t3", "data": { "id": "abc123" } } ] }
        },
        {
            "kind": "Listing",
            "data": {
                "children": [
                    {
                        "kind": "t1",
                        "data": {
                            "id": "c1",
                            "body": "ansible saved my weekend",
                            "author": "bob",
                            "permalink": "/r/devops/comments/abc123/deploying/c1/",
                            "score": 5,
                            "created_utc": 1_770_000_100.0,
                            "is_submitter": false
                        }
                    },
                    {
                        "kind": "more",
                        "data": { "count": 12, "children": ["c2", "c3"] }
                    }
                ]
            }
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/r/devops/comments/abc123"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let comments = client
        .fetch_comments("devops", "abc123", 20)
        .await
        .expect("should parse comments");

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].id.as_deref(), Some("c1"));
    assert_eq!(comments[0].body.as_deref(), Some("ansible saved my weekend"));
    assert_eq!(comments[0].score, Some(5));
}
