//! Persisted run artifacts: the full JSON array and a CSV projection.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use mentionbot_core::Mention;

use crate::error::PipelineError;

/// Columns of the reduced tabular projection, in order.
const CSV_COLUMNS: [&str; 9] = [
    "platform",
    "kind",
    "title",
    "author",
    "sentiment_label",
    "sentiment_score",
    "score",
    "created_at",
    "url",
];

/// Save mentions as a pretty-printed JSON array plus a CSV projection at
/// the matching `.csv` path.
///
/// Without an explicit `path` the artifacts land at
/// `mentions_{YYYYmmdd_HHMMSS}.json` / `.csv` in the working directory.
/// Returns the JSON path.
///
/// # Errors
///
/// Returns [`PipelineError::Serialize`] when JSON encoding fails and
/// [`PipelineError::Output`] when writing either file fails.
pub fn save_mentions(
    mentions: &[Mention],
    path: Option<&Path>,
    now: DateTime<Utc>,
) -> Result<PathBuf, PipelineError> {
    let json_path = match path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(format!("mentions_{}.json", now.format("%Y%m%d_%H%M%S"))),
    };

    let json = serde_json::to_string_pretty(mentions)?;
    std::fs::write(&json_path, json)?;

    let csv_path = json_path.with_extension("csv");
    std::fs::write(&csv_path, render_csv(mentions))?;

    Ok(json_path)
}

/// Render the CSV projection of `mentions`.
#[must_use]
pub fn render_csv(mentions: &[Mention]) -> String {
    let mut out = String::new();
    out.push_str(&CSV_COLUMNS.join(","));
    out.push('\n');

    for mention in mentions {
        let created_at = mention
            .created_at
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default();
        let row = [
            mention.platform.to_string(),
            mention.kind.to_string(),
            mention.title.clone(),
            mention.author.clone(),
            mention.sentiment.label.to_string(),
            mention.sentiment.polarity.to_string(),
            mention.score.to_string(),
            created_at,
            mention.url.clone(),
        ];
        let encoded: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
        out.push_str(&encoded.join(","));
        out.push('\n');
    }

    out
}

/// RFC 4180 quoting: wrap fields containing a comma, quote, or newline and
/// double any embedded quotes.
fn csv_field(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
