//! One complete mention check.

use chrono::Utc;

use mentionbot_core::{AppConfig, Mention};

use crate::aggregate::{sentiment_summary, SentimentSummary};
use crate::collect::{collect_mentions, connect_sources};
use crate::dedup::dedup_mentions;
use crate::error::PipelineError;
use crate::report::render_report;
use crate::window::TimeWindow;

/// Result of one complete mention check.
#[derive(Debug)]
pub struct RunOutcome {
    /// The deduplicated mention set, in collection order.
    pub mentions: Vec<Mention>,
    pub summary: SentimentSummary,
    pub report: String,
}

/// Run one complete check: connect sources, collect within the trailing
/// `hours_back` window, deduplicate, aggregate, and render the report.
///
/// # Errors
///
/// Returns [`PipelineError::NoUsableSources`] when at least one configured
/// source failed to initialize and none remain usable. A run with no
/// sources configured at all completes normally with an empty mention set.
pub async fn run_check(config: &AppConfig, hours_back: u32) -> Result<RunOutcome, PipelineError> {
    tracing::info!(hours_back, "starting mention check");

    let now = Utc::now();
    let window = TimeWindow::trailing(hours_back, now);

    let (monitors, init_failures) = connect_sources(config).await;
    if monitors.enabled_count() == 0 && init_failures > 0 {
        return Err(PipelineError::NoUsableSources);
    }

    let collected = collect_mentions(&monitors, config, window, now).await;
    let mentions = dedup_mentions(collected);
    let summary = sentiment_summary(&mentions);
    let report = render_report(&config.product_name, now, &mentions, config.top_mentions);

    Ok(RunOutcome {
        mentions,
        summary,
        report,
    })
}
