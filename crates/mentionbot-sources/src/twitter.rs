//! Twitter API v2 recent-search connector (bearer token).

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Url;
use serde::Deserialize;

use crate::error::SourceError;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

/// Recent search allows 10..=100 results per request.
const MIN_RESULTS_PER_REQUEST: usize = 10;
const MAX_RESULTS_PER_REQUEST: usize = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Option<Vec<RawTweet>>,
    includes: Option<Includes>,
}

#[derive(Debug, Deserialize)]
struct Includes {
    users: Option<Vec<RawTwitterUser>>,
}

/// A raw tweet from the v2 search endpoint. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTweet {
    pub id: Option<String>,
    pub text: Option<String>,
    pub author_id: Option<String>,
    pub created_at: Option<String>,
    pub lang: Option<String>,
    pub public_metrics: Option<TweetMetrics>,
}

impl RawTweet {
    /// Creation time as UTC; `None` when absent or unparsable.
    #[must_use]
    pub fn parsed_created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Engagement counters attached to a tweet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetMetrics {
    pub like_count: Option<i64>,
    pub retweet_count: Option<i64>,
    pub reply_count: Option<i64>,
    pub quote_count: Option<i64>,
}

/// An expanded author record from the search response's `includes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTwitterUser {
    pub id: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub verified: Option<bool>,
}

/// One page of search results: tweets plus their expanded authors.
#[derive(Debug, Clone, Default)]
pub struct TweetPage {
    pub tweets: Vec<RawTweet>,
    pub users: Vec<RawTwitterUser>,
}

impl TweetPage {
    /// Index the expanded users by id for author lookups.
    #[must_use]
    pub fn users_by_id(&self) -> HashMap<&str, &RawTwitterUser> {
        self.users
            .iter()
            .filter_map(|user| Some((user.id.as_deref()?, user)))
            .collect()
    }
}

/// Build a v2 recent-search query from the configured keywords.
///
/// Multi-word keywords are quoted as exact phrases, keywords are OR-joined,
/// and retweets and non-English tweets are excluded.
#[must_use]
pub fn build_recent_search_query(keywords: &[String]) -> String {
    let parts: Vec<String> = keywords
        .iter()
        .map(|keyword| {
            if keyword.contains(' ') {
                format!("\"{keyword}\"")
            } else {
                keyword.clone()
            }
        })
        .collect();
    format!("({}) -is:retweet lang:en", parts.join(" OR "))
}

/// Twitter API v2 client (app-only bearer auth).
pub struct TwitterClient {
    client: reqwest::Client,
    bearer_token: String,
    base_url: Url,
}

impl TwitterClient {
    /// Create a client pointed at the production API.
    ///
    /// Construction is offline; authentication errors surface on the first
    /// search call.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(bearer_token: &str, timeout_secs: u64) -> Result<Self, SourceError> {
        Self::with_base_url(bearer_token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// As [`TwitterClient::new`], plus [`SourceError::Api`] when the base
    /// URL does not parse.
    pub fn with_base_url(
        bearer_token: &str,
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

        Ok(Self {
            client,
            bearer_token: bearer_token.to_owned(),
            base_url,
        })
    }

    /// Search recent tweets matching `query` within `[start_time, end_time]`.
    ///
    /// Requests author expansion so usernames and display names can be
    /// resolved during normalization.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Api`] on a non-success status.
    /// - [`SourceError::Http`] on transport failures.
    /// - [`SourceError::Deserialize`] when the body does not match the
    ///   expected shape.
    pub async fn search_recent(
        &self,
        query: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        max_results: usize,
    ) -> Result<TweetPage, SourceError> {
        let url = self
            .base_url
            .join("2/tweets/search/recent")
            .map_err(|e| SourceError::Api(format!("invalid search URL: {e}")))?;

        let max_results = max_results.clamp(MIN_RESULTS_PER_REQUEST, MAX_RESULTS_PER_REQUEST);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .query(&[
                ("query", query.to_string()),
                ("max_results", max_results.to_string()),
                (
                    "start_time",
                    start_time.to_rfc3339_opts(SecondsFormat::Secs, true),
                ),
                (
                    "end_time",
                    end_time.to_rfc3339_opts(SecondsFormat::Secs, true),
                ),
                (
                    "tweet.fields",
                    "created_at,author_id,public_metrics,lang".to_string(),
                ),
                ("user.fields", "username,name,verified".to_string()),
                ("expansions", "author_id".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Twitter search failed with status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let parsed: SearchResponse =
            serde_json::from_value(body).map_err(|e| SourceError::Deserialize {
                context: format!("search_recent(query={query})"),
                source: e,
            })?;

        let page = TweetPage {
            tweets: parsed.data.unwrap_or_default(),
            users: parsed.includes.and_then(|i| i.users).unwrap_or_default(),
        };

        tracing::debug!(count = page.tweets.len(), "fetched recent tweets");

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_or_joins_and_quotes_phrases() {
        let keywords = vec![
            "ansible".to_string(),
            "ansible automation platform".to_string(),
        ];
        assert_eq!(
            build_recent_search_query(&keywords),
            "(ansible OR \"ansible automation platform\") -is:retweet lang:en"
        );
    }

    #[test]
    fn single_keyword_query_is_unquoted() {
        let keywords = vec!["ansible".to_string()];
        assert_eq!(
            build_recent_search_query(&keywords),
            "(ansible) -is:retweet lang:en"
        );
    }

    #[test]
    fn parsed_created_at_handles_rfc3339() {
        let tweet = RawTweet {
            created_at: Some("2026-08-01T12:30:00.000Z".to_string()),
            ..RawTweet::default()
        };
        let ts = tweet.parsed_created_at().expect("timestamp should parse");
        assert_eq!(ts.to_rfc3339_opts(SecondsFormat::Secs, true), "2026-08-01T12:30:00Z");
    }

    #[test]
    fn parsed_created_at_is_none_on_garbage() {
        let tweet = RawTweet {
            created_at: Some("yesterday".to_string()),
            ..RawTweet::default()
        };
        assert!(tweet.parsed_created_at().is_none());
    }

    #[test]
    fn users_by_id_skips_users_without_ids() {
        let page = TweetPage {
            tweets: vec![],
            users: vec![
                RawTwitterUser {
                    id: Some("1".to_string()),
                    username: Some("alice".to_string()),
                    ..RawTwitterUser::default()
                },
                RawTwitterUser::default(),
            ],
        };
        let map = page.users_by_id();
        assert_eq!(map.len(), 1);
        assert_eq!(map["1"].username.as_deref(), Some("alice"));
    }
}
