//! Text report rendering.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use mentionbot_core::Mention;

use crate::aggregate::{platform_breakdown, sentiment_summary, top_mentions};

const TITLE_PREVIEW_CHARS: usize = 60;

/// Render the run's summary report.
///
/// Carries the totals, platform breakdown, sentiment percentages, average
/// score, and the ranked top-`limit` mentions with author/score/sentiment/url
/// per item. Expects the deduplicated mention set.
#[must_use]
pub fn render_report(
    product_name: &str,
    generated_at: DateTime<Utc>,
    mentions: &[Mention],
    limit: usize,
) -> String {
    if mentions.is_empty() {
        return "No mentions found in the specified time period.".to_string();
    }

    let summary = sentiment_summary(mentions);
    let top = top_mentions(mentions, limit);
    let platforms = platform_breakdown(mentions)
        .iter()
        .map(|(platform, count)| format!("{platform}: {count}"))
        .collect::<Vec<_>>()
        .join(", ");
    let neutral_percentage = 100.0 - summary.positive_percentage - summary.negative_percentage;

    let mut out = String::new();
    let _ = writeln!(out, "=== {product_name} Mention Report ===");
    let _ = writeln!(
        out,
        "Generated: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "SUMMARY:");
    let _ = writeln!(out, "Total Mentions: {}", summary.total);
    let _ = writeln!(out, "Platforms: {platforms}");
    let _ = writeln!(out);
    let _ = writeln!(out, "SENTIMENT ANALYSIS:");
    let _ = writeln!(
        out,
        "Positive: {} ({:.1}%)",
        summary.positive, summary.positive_percentage
    );
    let _ = writeln!(
        out,
        "Negative: {} ({:.1}%)",
        summary.negative, summary.negative_percentage
    );
    let _ = writeln!(out, "Neutral: {} ({neutral_percentage:.1}%)", summary.neutral);
    let _ = writeln!(
        out,
        "Average Sentiment Score: {:.3}",
        summary.average_sentiment
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "TOP MENTIONS (by engagement):");
    for (rank, mention) in top.iter().enumerate() {
        let preview: String = mention.title.chars().take(TITLE_PREVIEW_CHARS).collect();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. [{}] {preview}...", rank + 1, mention.platform);
        let _ = writeln!(
            out,
            "   Author: {} | Score: {} | Sentiment: {}",
            mention.author, mention.score, mention.sentiment.label
        );
        let _ = writeln!(out, "   URL: {}", mention.url);
    }

    out
}
