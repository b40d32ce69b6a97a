/// Credentials for the Reddit client-credentials OAuth flow.
#[derive(Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

/// Credentials for a Bluesky app-password session.
#[derive(Clone)]
pub struct BlueskyCredentials {
    pub identifier: String,
    pub password: String,
}

/// Runtime configuration for one monitoring run.
///
/// A `None` credential group means that platform is disabled for the run.
#[derive(Clone)]
pub struct AppConfig {
    pub product_name: String,
    /// Keywords to match, in configured priority order. Never empty.
    pub keywords: Vec<String>,
    pub subreddits: Vec<String>,
    /// Default lookback window in hours when the caller does not override.
    pub check_interval_hours: u32,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// How many mentions the report's ranked view shows.
    pub top_mentions: usize,
    pub reddit: Option<RedditCredentials>,
    pub twitter_bearer_token: Option<String>,
    pub bluesky: Option<BlueskyCredentials>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("product_name", &self.product_name)
            .field("keywords", &self.keywords)
            .field("subreddits", &self.subreddits)
            .field("check_interval_hours", &self.check_interval_hours)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("top_mentions", &self.top_mentions)
            .field("reddit", &self.reddit.as_ref().map(|_| "[redacted]"))
            .field(
                "twitter_bearer_token",
                &self.twitter_bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .field("bluesky", &self.bluesky.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}
