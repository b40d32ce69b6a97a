//! Per-source record normalizers.
//!
//! Pure mappings from one raw platform record plus the matched keyword to
//! one canonical [`Mention`]. Missing or malformed fields always degrade to
//! defaults; normalization never fails, so partial data cannot abort the
//! pipeline.

use std::collections::HashMap;

use mentionbot_core::{Mention, MentionKind, Platform};
use mentionbot_sentiment::analyze;
use mentionbot_sources::{RawBlueskyPost, RawRedditComment, RawRedditPost, RawTweet, RawTwitterUser};
use serde_json::json;

/// Sentinel author for deleted Reddit accounts.
pub const DELETED_AUTHOR: &str = "[deleted]";

const BLUESKY_POST_PATH_MARKER: &str = "app.bsky.feed.post/";

/// Sum like/share-equivalent counters into the engagement score.
///
/// Absent counters count as 0 and the result never goes below 0, even when
/// a platform reports a negative value.
fn engagement(counters: &[Option<i64>]) -> i64 {
    counters.iter().map(|c| c.unwrap_or(0)).sum::<i64>().max(0)
}

/// Normalize a Reddit submission.
#[must_use]
pub fn normalize_reddit_post(post: &RawRedditPost, keyword: &str) -> Mention {
    let title = post.title.clone().unwrap_or_default();
    let content = post.selftext.clone().unwrap_or_default();
    let author = post
        .author
        .clone()
        .unwrap_or_else(|| DELETED_AUTHOR.to_string());
    let url = post
        .permalink
        .as_deref()
        .map(|permalink| format!("https://reddit.com{permalink}"))
        .unwrap_or_default();
    let sentiment = analyze(&format!("{title} {content}"));

    Mention {
        platform: Platform::Reddit,
        kind: MentionKind::Post,
        id: post.id.clone().unwrap_or_default(),
        title,
        content,
        author_display_name: author.clone(),
        author,
        url,
        score: engagement(&[post.score]),
        num_comments: post.num_comments.unwrap_or(0).max(0),
        created_at: post.created_at(),
        keyword_matched: keyword.to_string(),
        sentiment,
        raw_extra: json!({
            "subreddit": post.subreddit,
            "upvote_ratio": post.upvote_ratio,
            "distinguished": post.distinguished,
            "stickied": post.stickied,
        }),
    }
}

/// Normalize a Reddit comment found under `parent`.
///
/// Comments carry no sub-comment count in this pipeline's scope, so
/// `num_comments` is always 0.
#[must_use]
pub fn normalize_reddit_comment(
    comment: &RawRedditComment,
    parent: &RawRedditPost,
    keyword: &str,
) -> Mention {
    let content = comment.body.clone().unwrap_or_default();
    let author = comment
        .author
        .clone()
        .unwrap_or_else(|| DELETED_AUTHOR.to_string());
    let url = comment
        .permalink
        .as_deref()
        .map(|permalink| format!("https://reddit.com{permalink}"))
        .unwrap_or_default();
    let sentiment = analyze(&content);

    Mention {
        platform: Platform::Reddit,
        kind: MentionKind::Comment,
        id: comment.id.clone().unwrap_or_default(),
        title: format!("Comment on: {}", parent.title.as_deref().unwrap_or_default()),
        content,
        author_display_name: author.clone(),
        author,
        url,
        score: engagement(&[comment.score]),
        num_comments: 0,
        created_at: comment.created_at(),
        keyword_matched: keyword.to_string(),
        sentiment,
        raw_extra: json!({
            "subreddit": parent.subreddit,
            "is_submitter": comment.is_submitter,
            "parent_post_id": parent.id,
            "parent_post_title": parent.title,
        }),
    }
}

/// Normalize a tweet, resolving its author from the expansion `users` map.
///
/// When the author expansion is missing, the handle is synthesized as
/// `user_<author_id>` so the mention still carries a usable author field.
#[must_use]
pub fn normalize_tweet(
    tweet: &RawTweet,
    users: &HashMap<&str, &RawTwitterUser>,
    keyword: &str,
) -> Mention {
    let user = tweet
        .author_id
        .as_deref()
        .and_then(|id| users.get(id))
        .copied();
    let author = user
        .and_then(|u| u.username.clone())
        .unwrap_or_else(|| match tweet.author_id.as_deref() {
            Some(id) => format!("user_{id}"),
            None => "user_unknown".to_string(),
        });
    let author_display_name = user
        .and_then(|u| u.name.clone())
        .unwrap_or_else(|| author.clone());
    let id = tweet.id.clone().unwrap_or_default();
    let content = tweet.text.clone().unwrap_or_default();
    let metrics = tweet.public_metrics.clone().unwrap_or_default();
    let sentiment = analyze(&content);

    Mention {
        platform: Platform::Twitter,
        kind: MentionKind::Tweet,
        title: format!("Tweet by @{author}"),
        url: format!("https://twitter.com/{author}/status/{id}"),
        id,
        content,
        author_display_name,
        author,
        score: engagement(&[metrics.like_count, metrics.retweet_count]),
        num_comments: metrics.reply_count.unwrap_or(0).max(0),
        created_at: tweet.parsed_created_at(),
        keyword_matched: keyword.to_string(),
        sentiment,
        raw_extra: json!({
            "retweet_count": metrics.retweet_count.unwrap_or(0),
            "like_count": metrics.like_count.unwrap_or(0),
            "reply_count": metrics.reply_count.unwrap_or(0),
            "quote_count": metrics.quote_count.unwrap_or(0),
            "verified_user": user.and_then(|u| u.verified).unwrap_or(false),
            "language": tweet.lang,
        }),
    }
}

/// Normalize a Bluesky post.
///
/// The id prefers the content hash (`cid`) and falls back to the `at://`
/// uri when the cid is absent or empty.
#[must_use]
pub fn normalize_bluesky_post(post: &RawBlueskyPost, keyword: &str) -> Mention {
    let author = post.author.as_ref();
    let handle = author
        .and_then(|a| a.handle.clone())
        .unwrap_or_else(|| "unknown".to_string());
    let author_display_name = author
        .and_then(|a| a.display_name.clone())
        .unwrap_or_else(|| handle.clone());
    let uri = post.uri.clone().unwrap_or_default();
    let id = match post.cid.as_deref() {
        Some(cid) if !cid.is_empty() => cid.to_string(),
        _ => uri.clone(),
    };
    let content = post.text().to_string();
    let sentiment = analyze(&content);

    Mention {
        platform: Platform::Bluesky,
        kind: MentionKind::Post,
        id,
        title: format!("Post by @{handle}"),
        content,
        url: bluesky_post_url(&handle, &uri),
        author_display_name,
        author: handle,
        score: engagement(&[post.like_count, post.repost_count]),
        num_comments: post.reply_count.unwrap_or(0).max(0),
        created_at: post.created_at(),
        keyword_matched: keyword.to_string(),
        sentiment,
        raw_extra: json!({
            "like_count": post.like_count.unwrap_or(0),
            "repost_count": post.repost_count.unwrap_or(0),
            "reply_count": post.reply_count.unwrap_or(0),
            "uri": uri,
            "cid": post.cid.clone().unwrap_or_default(),
            "author_did": author.and_then(|a| a.did.clone()),
            "author_avatar": author.and_then(|a| a.avatar.clone()),
            "indexed_at": post.indexed_at,
        }),
    }
}

/// Build the web URL for a Bluesky post from its handle and `at://` uri.
///
/// Falls back to the author-profile URL when the post path marker is absent
/// or the trailing record key is empty.
fn bluesky_post_url(handle: &str, uri: &str) -> String {
    if let Some((_, rkey)) = uri.split_once(BLUESKY_POST_PATH_MARKER) {
        if !rkey.is_empty() {
            return format!("https://bsky.app/profile/{handle}/post/{rkey}");
        }
    }
    format!("https://bsky.app/profile/{handle}")
}
