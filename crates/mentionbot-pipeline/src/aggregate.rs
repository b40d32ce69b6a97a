//! Aggregation over the deduplicated mention set.

use mentionbot_core::{Mention, Platform, SentimentLabel};
use serde::Serialize;

/// Sentiment distribution across one run's mentions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Arithmetic mean of polarity; 0.0 when the set is empty.
    pub average_sentiment: f64,
    pub positive_percentage: f64,
    pub negative_percentage: f64,
}

impl SentimentSummary {
    fn empty() -> Self {
        Self {
            total: 0,
            positive: 0,
            negative: 0,
            neutral: 0,
            average_sentiment: 0.0,
            positive_percentage: 0.0,
            negative_percentage: 0.0,
        }
    }
}

/// Count labels and average polarity over `mentions`.
#[must_use]
pub fn sentiment_summary(mentions: &[Mention]) -> SentimentSummary {
    if mentions.is_empty() {
        return SentimentSummary::empty();
    }

    let mut positive = 0;
    let mut negative = 0;
    let mut neutral = 0;
    let mut polarity_sum = 0.0_f64;
    for mention in mentions {
        match mention.sentiment.label {
            SentimentLabel::Positive => positive += 1,
            SentimentLabel::Negative => negative += 1,
            SentimentLabel::Neutral => neutral += 1,
        }
        polarity_sum += mention.sentiment.polarity;
    }

    #[allow(clippy::cast_precision_loss)]
    let total = mentions.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let (positive_f, negative_f) = (positive as f64, negative as f64);

    SentimentSummary {
        total: mentions.len(),
        positive,
        negative,
        neutral,
        average_sentiment: polarity_sum / total,
        positive_percentage: positive_f / total * 100.0,
        negative_percentage: negative_f / total * 100.0,
    }
}

/// Mentions-per-platform counts, in first-seen order.
#[must_use]
pub fn platform_breakdown(mentions: &[Mention]) -> Vec<(Platform, usize)> {
    let mut counts: Vec<(Platform, usize)> = Vec::new();
    for mention in mentions {
        match counts.iter_mut().find(|(p, _)| *p == mention.platform) {
            Some((_, count)) => *count += 1,
            None => counts.push((mention.platform, 1)),
        }
    }
    counts
}

/// The top `limit` mentions by engagement score.
///
/// Stable descending sort: mentions with equal scores keep their original
/// relative order.
#[must_use]
pub fn top_mentions(mentions: &[Mention], limit: usize) -> Vec<Mention> {
    let mut ranked = mentions.to_vec();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(limit);
    ranked
}
