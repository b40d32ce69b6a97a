//! Bluesky (AT Protocol) XRPC connector.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Deserialize;

use crate::error::SourceError;
use mentionbot_core::BlueskyCredentials;

const DEFAULT_SERVICE_URL: &str = "https://bsky.social";

/// `searchPosts` caps `limit` at 100.
const MAX_RESULTS_PER_REQUEST: usize = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    access_jwt: String,
}

#[derive(Debug, Deserialize)]
struct SearchPostsResponse {
    posts: Option<Vec<RawBlueskyPost>>,
}

/// A raw post view from `app.bsky.feed.searchPosts`. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlueskyPost {
    /// `at://did:plc:…/app.bsky.feed.post/<rkey>` resource identifier.
    pub uri: Option<String>,
    pub cid: Option<String>,
    pub author: Option<BlueskyAuthor>,
    pub record: Option<BlueskyRecord>,
    pub like_count: Option<i64>,
    pub repost_count: Option<i64>,
    pub reply_count: Option<i64>,
    pub indexed_at: Option<String>,
}

impl RawBlueskyPost {
    /// The post body, or `""` when absent.
    #[must_use]
    pub fn text(&self) -> &str {
        self.record
            .as_ref()
            .and_then(|record| record.text.as_deref())
            .unwrap_or("")
    }

    /// Creation time as UTC; `None` when absent or unparsable.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.record.as_ref()?.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Author block on a post view.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueskyAuthor {
    pub did: Option<String>,
    pub handle: Option<String>,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
}

/// The embedded `app.bsky.feed.post` record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueskyRecord {
    pub text: Option<String>,
    pub created_at: Option<String>,
}

/// Bluesky XRPC client holding a session token.
pub struct BlueskyClient {
    client: reqwest::Client,
    access_jwt: String,
    base_url: Url,
}

impl BlueskyClient {
    /// Create a session against the production service.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Auth`] when the session is rejected and
    /// [`SourceError::Http`] on transport failures.
    pub async fn login(
        creds: &BlueskyCredentials,
        timeout_secs: u64,
    ) -> Result<Self, SourceError> {
        Self::login_with_base_url(creds, timeout_secs, DEFAULT_SERVICE_URL).await
    }

    /// Create a session against a custom service URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// As [`BlueskyClient::login`], plus [`SourceError::Api`] when the base
    /// URL does not parse.
    pub async fn login_with_base_url(
        creds: &BlueskyCredentials,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| SourceError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        let url = base_url
            .join("xrpc/com.atproto.server.createSession")
            .map_err(|e| SourceError::Api(format!("invalid session URL: {e}")))?;

        let response = client
            .post(url)
            .json(&serde_json::json!({
                "identifier": creds.identifier,
                "password": creds.password,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Auth(format!(
                "Bluesky session creation failed with status {}",
                response.status()
            )));
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Auth(format!("Bluesky session parse error: {e}")))?;

        Ok(Self {
            client,
            access_jwt: session.access_jwt,
            base_url,
        })
    }

    /// Search posts containing `query`.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Api`] on a non-success status.
    /// - [`SourceError::Http`] on transport failures.
    /// - [`SourceError::Deserialize`] when the body does not match the
    ///   expected shape.
    pub async fn search_posts(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawBlueskyPost>, SourceError> {
        let url = self
            .base_url
            .join("xrpc/app.bsky.feed.searchPosts")
            .map_err(|e| SourceError::Api(format!("invalid search URL: {e}")))?;

        let limit = limit.clamp(1, MAX_RESULTS_PER_REQUEST);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_jwt)
            .query(&[("q", query.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Bluesky search failed with status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let parsed: SearchPostsResponse =
            serde_json::from_value(body).map_err(|e| SourceError::Deserialize {
                context: format!("searchPosts(q={query})"),
                source: e,
            })?;

        let posts = parsed.posts.unwrap_or_default();
        tracing::debug!(query, count = posts.len(), "fetched Bluesky posts");

        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_defaults_to_empty() {
        assert_eq!(RawBlueskyPost::default().text(), "");
    }

    #[test]
    fn created_at_parses_rfc3339() {
        let post = RawBlueskyPost {
            record: Some(BlueskyRecord {
                text: Some("hello".to_string()),
                created_at: Some("2026-08-01T00:00:00Z".to_string()),
            }),
            ..RawBlueskyPost::default()
        };
        assert!(post.created_at().is_some());
    }

    #[test]
    fn created_at_is_none_on_garbage() {
        let post = RawBlueskyPost {
            record: Some(BlueskyRecord {
                text: None,
                created_at: Some("not-a-timestamp".to_string()),
            }),
            ..RawBlueskyPost::default()
        };
        assert!(post.created_at().is_none());
    }
}
