//! Reddit listing API connector (client-credentials OAuth).

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Deserialize;

use crate::error::SourceError;
use mentionbot_core::RedditCredentials;

const DEFAULT_AUTH_BASE_URL: &str = "https://www.reddit.com";
const DEFAULT_API_BASE_URL: &str = "https://oauth.reddit.com";

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: RawRedditPost,
}

/// A raw Reddit submission as returned by the listing API.
///
/// Every field is optional; absent data is resolved to defaults during
/// normalization, never here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRedditPost {
    pub id: Option<String>,
    pub title: Option<String>,
    pub selftext: Option<String>,
    pub author: Option<String>,
    pub subreddit: Option<String>,
    pub permalink: Option<String>,
    pub score: Option<i64>,
    pub num_comments: Option<i64>,
    pub created_utc: Option<f64>,
    pub upvote_ratio: Option<f64>,
    pub distinguished: Option<String>,
    pub stickied: Option<bool>,
}

impl RawRedditPost {
    /// Creation time as UTC; `None` when absent or out of range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_utc? as i64, 0)
    }
}

/// A raw Reddit comment from a submission's comment tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRedditComment {
    pub id: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
    pub permalink: Option<String>,
    pub score: Option<i64>,
    pub created_utc: Option<f64>,
    pub is_submitter: Option<bool>,
}

impl RawRedditComment {
    /// Creation time as UTC; `None` when absent or out of range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_utc? as i64, 0)
    }
}

/// Reddit API client holding a valid access token.
pub struct RedditClient {
    client: reqwest::Client,
    token: String,
    user_agent: String,
    api_base: Url,
}

impl RedditClient {
    /// Connect to Reddit by exchanging client credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Auth`] if the token exchange is rejected and
    /// [`SourceError::Http`] on transport failures.
    pub async fn connect(
        creds: &RedditCredentials,
        timeout_secs: u64,
    ) -> Result<Self, SourceError> {
        Self::connect_with_base_urls(
            creds,
            timeout_secs,
            DEFAULT_AUTH_BASE_URL,
            DEFAULT_API_BASE_URL,
        )
        .await
    }

    /// Connect with custom auth/API base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// As [`RedditClient::connect`], plus [`SourceError::Api`] when a base
    /// URL does not parse.
    pub async fn connect_with_base_urls(
        creds: &RedditCredentials,
        timeout_secs: u64,
        auth_base_url: &str,
        api_base_url: &str,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let api_base = parse_base_url(api_base_url)?;
        let auth_base = parse_base_url(auth_base_url)?;

        let token = Self::fetch_token(&client, creds, &auth_base).await?;

        Ok(Self {
            client,
            token,
            user_agent: creds.user_agent.clone(),
            api_base,
        })
    }

    async fn fetch_token(
        client: &reqwest::Client,
        creds: &RedditCredentials,
        auth_base: &Url,
    ) -> Result<String, SourceError> {
        let url = auth_base
            .join("api/v1/access_token")
            .map_err(|e| SourceError::Api(format!("invalid token URL: {e}")))?;

        let response = client
            .post(url)
            .header("User-Agent", &creds.user_agent)
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Auth(format!(
                "Reddit token exchange failed with status {}",
                response.status()
            )));
        }

        let token_resp: TokenResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Auth(format!("Reddit token parse error: {e}")))?;

        Ok(token_resp.access_token)
    }

    /// Fetch the newest submissions in a subreddit.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Api`] on a non-success status and
    /// [`SourceError::Http`] on transport failures.
    pub async fn fetch_new_posts(
        &self,
        subreddit: &str,
        limit: usize,
    ) -> Result<Vec<RawRedditPost>, SourceError> {
        self.fetch_post_listing(subreddit, "new", limit).await
    }

    /// Fetch the currently-hot submissions in a subreddit.
    ///
    /// # Errors
    ///
    /// As [`RedditClient::fetch_new_posts`].
    pub async fn fetch_hot_posts(
        &self,
        subreddit: &str,
        limit: usize,
    ) -> Result<Vec<RawRedditPost>, SourceError> {
        self.fetch_post_listing(subreddit, "hot", limit).await
    }

    async fn fetch_post_listing(
        &self,
        subreddit: &str,
        sort: &str,
        limit: usize,
    ) -> Result<Vec<RawRedditPost>, SourceError> {
        let url = self
            .api_base
            .join(&format!("r/{subreddit}/{sort}"))
            .map_err(|e| SourceError::Api(format!("invalid listing URL: {e}")))?;

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", &self.user_agent)
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Reddit listing r/{subreddit}/{sort} failed with status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let listing: Listing =
            serde_json::from_value(body).map_err(|e| SourceError::Deserialize {
                context: format!("r/{subreddit}/{sort}"),
                source: e,
            })?;

        let posts: Vec<RawRedditPost> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .collect();

        tracing::debug!(
            subreddit,
            sort,
            count = posts.len(),
            "fetched Reddit listing"
        );

        Ok(posts)
    }

    /// Fetch top-level comments of one submission.
    ///
    /// Reddit answers with a two-element array (the submission listing, then
    /// the comment listing); `more`-style placeholder children are skipped,
    /// as are comments whose payload does not parse.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Api`] on a non-success status and
    /// [`SourceError::Http`] on transport failures.
    pub async fn fetch_comments(
        &self,
        subreddit: &str,
        post_id: &str,
        limit: usize,
    ) -> Result<Vec<RawRedditComment>, SourceError> {
        let url = self
            .api_base
            .join(&format!("r/{subreddit}/comments/{post_id}"))
            .map_err(|e| SourceError::Api(format!("invalid comments URL: {e}")))?;

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", &self.user_agent)
            .query(&[("limit", limit.to_string()), ("depth", "1".to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Reddit comments for r/{subreddit}/{post_id} failed with status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let comments: Vec<RawRedditComment> = body
            .get(1)
            .and_then(|listing| listing.pointer("/data/children"))
            .and_then(serde_json::Value::as_array)
            .map(|children| {
                children
                    .iter()
                    .filter(|child| {
                        child.get("kind").and_then(serde_json::Value::as_str) == Some("t1")
                    })
                    .filter_map(|child| {
                        serde_json::from_value::<RawRedditComment>(child.get("data")?.clone()).ok()
                    })
                    .collect()
            })
            .unwrap_or_default();

        tracing::debug!(
            subreddit,
            post_id,
            count = comments.len(),
            "fetched Reddit comments"
        );

        Ok(comments)
    }
}

/// Normalise a base URL to end with exactly one slash so `Url::join`
/// appends to the path rather than replacing the last segment.
fn parse_base_url(base_url: &str) -> Result<Url, SourceError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised)
        .map_err(|e| SourceError::Api(format!("invalid base URL '{base_url}': {e}")))
}
