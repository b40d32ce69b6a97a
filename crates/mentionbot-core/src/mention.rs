use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform a mention was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Reddit,
    Twitter,
    Bluesky,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Reddit => write!(f, "reddit"),
            Platform::Twitter => write!(f, "twitter"),
            Platform::Bluesky => write!(f, "bluesky"),
        }
    }
}

/// The kind of content a mention was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionKind {
    Post,
    Comment,
    Tweet,
}

impl std::fmt::Display for MentionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MentionKind::Post => write!(f, "post"),
            MentionKind::Comment => write!(f, "comment"),
            MentionKind::Tweet => write!(f, "tweet"),
        }
    }
}

/// Three-way sentiment classification derived from polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Neutral => write!(f, "neutral"),
            SentimentLabel::Negative => write!(f, "negative"),
        }
    }
}

/// Sentiment attached to a mention.
///
/// Flattened into the canonical record on serialization, so consumers see
/// `sentiment_score` / `sentiment_subjectivity` / `sentiment_label` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Signed strength in `[-1.0, 1.0]`; negative is unfavorable.
    #[serde(rename = "sentiment_score")]
    pub polarity: f64,
    /// Opinion-vs-fact strength in `[0.0, 1.0]`. Not used for labeling,
    /// carried for downstream consumers.
    #[serde(rename = "sentiment_subjectivity")]
    pub subjectivity: f64,
    #[serde(rename = "sentiment_label")]
    pub label: SentimentLabel,
}

impl Sentiment {
    /// The neutral zero sentiment, used for empty or unscorable text.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
            label: SentimentLabel::Neutral,
        }
    }
}

/// One canonical record representing a single post, comment, or tweet that
/// matched a configured keyword.
///
/// Constructed once by a record normalizer from one raw platform record and
/// never mutated afterward. `score` is the combined like/share-equivalent
/// engagement count and is always `>= 0`; `created_at` is `None` when the
/// source timestamp was absent or unparsable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    pub platform: Platform,
    pub kind: MentionKind,
    /// Collaborator-supplied identifier, unique within a platform only.
    /// Empty when the source omitted it.
    pub id: String,
    /// Synthesized for feed-style platforms ("Tweet by @…", "Post by @…").
    pub title: String,
    pub content: String,
    pub author: String,
    pub author_display_name: String,
    pub url: String,
    pub score: i64,
    pub num_comments: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub keyword_matched: String,
    #[serde(flatten)]
    pub sentiment: Sentiment,
    /// Platform-specific fields preserved for downstream use; never
    /// interpreted by the pipeline.
    pub raw_extra: serde_json::Value,
}
