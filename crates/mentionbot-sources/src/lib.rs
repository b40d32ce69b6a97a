//! Platform connectors for mentionbot.
//!
//! Thin, typed HTTP clients over the Reddit listing API, the Twitter v2
//! recent-search API, and the Bluesky XRPC endpoints. Each client exposes
//! raw platform records as serde structs whose fields are all optional, so
//! the pipeline tolerates any of them being absent. Turning raw records
//! into canonical mentions is the pipeline's job, not the connectors'.

pub mod bluesky;
pub mod error;
pub mod reddit;
pub mod twitter;

pub use bluesky::{BlueskyAuthor, BlueskyClient, BlueskyRecord, RawBlueskyPost};
pub use error::SourceError;
pub use reddit::{RawRedditComment, RawRedditPost, RedditClient};
pub use twitter::{
    build_recent_search_query, RawTweet, RawTwitterUser, TweetMetrics, TweetPage, TwitterClient,
};
