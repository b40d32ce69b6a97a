//! Source connection and mention collection.
//!
//! One failing unit of work (a subreddit listing, a comment tree, one
//! keyword search, one platform call) is logged and skipped; it never
//! aborts the other units or the run. The pure `match_*` processors are
//! split from the async fetch loops so the pipeline can be exercised on
//! constructed records without any network.

use chrono::{DateTime, Utc};

use mentionbot_core::{AppConfig, Mention};
use mentionbot_sources::{
    build_recent_search_query, BlueskyClient, RawBlueskyPost, RawRedditComment, RawRedditPost,
    RedditClient, SourceError, TweetPage, TwitterClient,
};

use crate::matcher::MatchStrategy;
use crate::normalize::{
    normalize_bluesky_post, normalize_reddit_comment, normalize_reddit_post, normalize_tweet,
};
use crate::window::TimeWindow;

const NEW_POSTS_LIMIT: usize = 100;
const HOT_POSTS_LIMIT: usize = 50;
const COMMENTS_PER_POST: usize = 20;
const TWITTER_MAX_RESULTS: usize = 100;
const BLUESKY_MAX_RESULTS: usize = 100;

/// Connected platform clients for one run.
///
/// A `None` slot means the source is not configured or failed to
/// initialize and is disabled for the run.
pub struct Monitors {
    pub reddit: Option<RedditClient>,
    pub twitter: Option<TwitterClient>,
    pub bluesky: Option<BlueskyClient>,
}

impl Monitors {
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        usize::from(self.reddit.is_some())
            + usize::from(self.twitter.is_some())
            + usize::from(self.bluesky.is_some())
    }
}

/// Connect every configured source.
///
/// Returns the connected set plus the number of sources that were
/// configured but failed to initialize. Missing credentials disable a
/// source with a warning; they are not an initialization failure.
pub async fn connect_sources(config: &AppConfig) -> (Monitors, usize) {
    let mut init_failures = 0;

    let reddit = match &config.reddit {
        Some(creds) => match RedditClient::connect(creds, config.request_timeout_secs).await {
            Ok(client) => {
                tracing::info!("Reddit monitor initialized");
                Some(client)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize Reddit monitor");
                init_failures += 1;
                None
            }
        },
        None => {
            tracing::warn!("Reddit credentials not found - Reddit monitoring disabled");
            None
        }
    };

    let twitter = match &config.twitter_bearer_token {
        Some(token) => match TwitterClient::new(token, config.request_timeout_secs) {
            Ok(client) => {
                tracing::info!("Twitter monitor initialized");
                Some(client)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize Twitter monitor");
                init_failures += 1;
                None
            }
        },
        None => {
            tracing::warn!("Twitter credentials not found - Twitter monitoring disabled");
            None
        }
    };

    let bluesky = match &config.bluesky {
        Some(creds) => match BlueskyClient::login(creds, config.request_timeout_secs).await {
            Ok(client) => {
                tracing::info!("Bluesky monitor initialized");
                Some(client)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize Bluesky monitor");
                init_failures += 1;
                None
            }
        },
        None => {
            tracing::warn!("Bluesky credentials not found - Bluesky monitoring disabled");
            None
        }
    };

    (
        Monitors {
            reddit,
            twitter,
            bluesky,
        },
        init_failures,
    )
}

/// Collect mentions from every enabled source.
///
/// Source failures are logged and skipped; the combined list carries
/// whatever the remaining sources produced.
pub async fn collect_mentions(
    monitors: &Monitors,
    config: &AppConfig,
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Vec<Mention> {
    let mut mentions = Vec::new();

    if let Some(reddit) = &monitors.reddit {
        tracing::info!("collecting Reddit mentions");
        let found = collect_reddit(reddit, &config.keywords, &config.subreddits, window).await;
        tracing::info!(count = found.len(), "found Reddit mentions");
        mentions.extend(found);
    }

    if let Some(twitter) = &monitors.twitter {
        tracing::info!("collecting Twitter mentions");
        match collect_twitter(twitter, &config.keywords, window, now).await {
            Ok(found) => {
                tracing::info!(count = found.len(), "found Twitter mentions");
                mentions.extend(found);
            }
            Err(e) => tracing::error!(error = %e, "error collecting Twitter mentions"),
        }
    }

    if let Some(bluesky) = &monitors.bluesky {
        tracing::info!("collecting Bluesky mentions");
        let found = collect_bluesky(bluesky, &config.keywords, window).await;
        tracing::info!(count = found.len(), "found Bluesky mentions");
        mentions.extend(found);
    }

    tracing::info!(total = mentions.len(), "total mentions collected");
    mentions
}

/// Scan each configured subreddit: fresh posts, then comments under the
/// currently-hot posts. One subreddit failing never stops the others.
async fn collect_reddit(
    client: &RedditClient,
    keywords: &[String],
    subreddits: &[String],
    window: TimeWindow,
) -> Vec<Mention> {
    let mut mentions = Vec::new();

    for subreddit in subreddits {
        tracing::info!(subreddit = %subreddit, "searching subreddit");

        match client.fetch_new_posts(subreddit, NEW_POSTS_LIMIT).await {
            Ok(posts) => mentions.extend(match_reddit_posts(&posts, keywords, window)),
            Err(e) => {
                tracing::warn!(subreddit = %subreddit, error = %e, "subreddit post scan failed");
                continue;
            }
        }

        let hot = match client.fetch_hot_posts(subreddit, HOT_POSTS_LIMIT).await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!(subreddit = %subreddit, error = %e, "hot listing fetch failed");
                continue;
            }
        };

        for post in hot.iter().filter(|p| window.retains(p.created_at())) {
            let Some(post_id) = post.id.as_deref() else {
                continue;
            };
            match client
                .fetch_comments(subreddit, post_id, COMMENTS_PER_POST)
                .await
            {
                Ok(comments) => {
                    mentions.extend(match_reddit_comments(&comments, post, keywords, window));
                }
                Err(e) => {
                    tracing::warn!(
                        subreddit = %subreddit,
                        post_id = %post_id,
                        error = %e,
                        "comment fetch failed"
                    );
                }
            }
        }
    }

    mentions
}

async fn collect_twitter(
    client: &TwitterClient,
    keywords: &[String],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Result<Vec<Mention>, SourceError> {
    let query = build_recent_search_query(keywords);
    tracing::info!(query = %query, "searching Twitter");
    let page = client
        .search_recent(&query, window.cutoff(), now, TWITTER_MAX_RESULTS)
        .await?;
    Ok(match_tweets(&page, keywords, window))
}

/// Search once per keyword; a failed keyword search never stops the others.
async fn collect_bluesky(
    client: &BlueskyClient,
    keywords: &[String],
    window: TimeWindow,
) -> Vec<Mention> {
    let mut mentions = Vec::new();

    for keyword in keywords {
        tracing::info!(keyword = %keyword, "searching Bluesky");
        match client.search_posts(keyword, BLUESKY_MAX_RESULTS).await {
            Ok(posts) => {
                mentions.extend(match_bluesky_posts(
                    &posts,
                    std::slice::from_ref(keyword),
                    window,
                ));
            }
            Err(e) => {
                tracing::warn!(keyword = %keyword, error = %e, "Bluesky keyword search failed");
            }
        }
    }

    mentions
}

/// Window-filter and keyword-match Reddit posts. Posts match on title and
/// body together; the first configured keyword found wins.
#[must_use]
pub fn match_reddit_posts(
    posts: &[RawRedditPost],
    keywords: &[String],
    window: TimeWindow,
) -> Vec<Mention> {
    let mut mentions = Vec::new();
    for post in posts {
        if !window.retains(post.created_at()) {
            continue;
        }
        let searchable = format!(
            "{} {}",
            post.title.as_deref().unwrap_or(""),
            post.selftext.as_deref().unwrap_or("")
        );
        if let Some(keyword) = MatchStrategy::FirstWins.credit(&searchable, keywords).first() {
            mentions.push(normalize_reddit_post(post, keyword));
        }
    }
    mentions
}

/// Window-filter and keyword-match comments under one post. Comments match
/// on their body alone.
#[must_use]
pub fn match_reddit_comments(
    comments: &[RawRedditComment],
    parent: &RawRedditPost,
    keywords: &[String],
    window: TimeWindow,
) -> Vec<Mention> {
    let mut mentions = Vec::new();
    for comment in comments {
        if !window.retains(comment.created_at()) {
            continue;
        }
        let searchable = comment.body.as_deref().unwrap_or("");
        if let Some(keyword) = MatchStrategy::FirstWins.credit(searchable, keywords).first() {
            mentions.push(normalize_reddit_comment(comment, parent, keyword));
        }
    }
    mentions
}

/// Window-filter and keyword-match one page of tweets.
#[must_use]
pub fn match_tweets(page: &TweetPage, keywords: &[String], window: TimeWindow) -> Vec<Mention> {
    let users = page.users_by_id();
    let mut mentions = Vec::new();
    for tweet in &page.tweets {
        if !window.retains(tweet.parsed_created_at()) {
            continue;
        }
        let searchable = tweet.text.as_deref().unwrap_or("");
        if let Some(keyword) = MatchStrategy::FirstWins.credit(searchable, keywords).first() {
            mentions.push(normalize_tweet(tweet, &users, keyword));
        }
    }
    mentions
}

/// Window-filter and keyword-match Bluesky posts.
///
/// Per-keyword crediting: the caller iterates keywords outer (one search
/// per keyword), so a post appearing in several searches yields one
/// candidate mention per keyword; the deduplicator reconciles those later.
#[must_use]
pub fn match_bluesky_posts(
    posts: &[RawBlueskyPost],
    keywords: &[String],
    window: TimeWindow,
) -> Vec<Mention> {
    let mut mentions = Vec::new();
    for post in posts {
        if !window.retains(post.created_at()) {
            continue;
        }
        for keyword in MatchStrategy::PerKeyword.credit(post.text(), keywords) {
            mentions.push(normalize_bluesky_post(post, keyword));
        }
    }
    mentions
}
