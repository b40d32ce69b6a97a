//! Integration tests for `BlueskyClient` using wiremock HTTP mocks.

use mentionbot_core::BlueskyCredentials;
use mentionbot_sources::{BlueskyClient, SourceError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_creds() -> BlueskyCredentials {
    BlueskyCredentials {
        identifier: "bot.bsky.social".to_string(),
        password: "app-password".to_string(),
    }
}

async fn mount_session_mock(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/xrpc/com.atproto.server.createSession"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "accessJwt": "test-jwt",
            "refreshJwt": "test-refresh",
            "handle": "bot.bsky.social",
            "did": "did:plc:testbot"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_creates_session() {
    let server = MockServer::start().await;
    mount_session_mock(&server).await;

    BlueskyClient::login_with_base_url(&test_creds(), 30, &server.uri())
        .await
        .expect("login should succeed");
}

#[tokio::test]
async fn login_surfaces_rejected_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/xrpc/com.atproto.server.createSession"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = BlueskyClient::login_with_base_url(&test_creds(), 30, &server.uri()).await;
    assert!(
        matches!(result, Err(SourceError::Auth(_))),
        "expected Auth error"
    );
}

#[tokio::test]
async fn search_posts_parses_post_views() {
    let server = MockServer::start().await;
    mount_session_mock(&server).await;

    let body = serde_json::json!({
        "posts": [
            {
                "uri": "at://did:plc:abc/app.bsky.feed.post/3kxyz",
                "cid": "bafyreia",
                "author": {
                    "did": "did:plc:abc",
                    "handle": "carol.bsky.social",
                    "displayName": "Carol",
                    "avatar": "https://cdn.bsky.app/avatar.jpg"
                },
                "record": {
                    "text": "trying out ansible tonight",
                    "createdAt": "2026-08-01T20:15:00.000Z"
                },
                "likeCount": 3,
                "repostCount": 1,
                "replyCount": 0,
                "indexedAt": "2026-08-01T20:15:05.000Z"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/xrpc/app.bsky.feed.searchPosts"))
        .and(query_param("q", "ansible"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = BlueskyClient::login_with_base_url(&test_creds(), 30, &server.uri())
        .await
        .expect("login should succeed");
    let posts = client
        .search_posts("ansible", 100)
        .await
        .expect("should parse posts");

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].cid.as_deref(), Some("bafyreia"));
    assert_eq!(posts[0].text(), "trying out ansible tonight");
    assert_eq!(posts[0].like_count, Some(3));
    assert!(posts[0].created_at().is_some());
    let author = posts[0].author.as_ref().unwrap();
    assert_eq!(author.handle.as_deref(), Some("carol.bsky.social"));
}

#[tokio::test]
async fn search_posts_surfaces_api_failure() {
    let server = MockServer::start().await;
    mount_session_mock(&server).await;

    Mock::given(method("GET"))
        .and(path("/xrpc/app.bsky.feed.searchPosts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = BlueskyClient::login_with_base_url(&test_creds(), 30, &server.uri())
        .await
        .expect("login should succeed");
    let result = client.search_posts("ansible", 100).await;
    assert!(
        matches!(result, Err(SourceError::Api(_))),
        "expected Api error"
    );
}
