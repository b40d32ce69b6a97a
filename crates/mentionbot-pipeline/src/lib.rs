//! The mention pipeline.
//!
//! Takes heterogeneous raw platform records and turns them into one
//! canonical, deduplicated, sentiment-scored, ranked mention set plus a
//! summary report. Per source the flow is: raw records → time-window
//! filter → keyword matcher → record normalizer; the combined list then
//! passes through the deduplicator and the aggregator/reporter.

pub mod aggregate;
pub mod collect;
pub mod dedup;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod output;
pub mod report;
pub mod run;
pub mod window;

pub use aggregate::{platform_breakdown, sentiment_summary, top_mentions, SentimentSummary};
pub use collect::{collect_mentions, connect_sources, Monitors};
pub use dedup::dedup_mentions;
pub use error::PipelineError;
pub use matcher::MatchStrategy;
pub use output::save_mentions;
pub use report::render_report;
pub use run::{run_check, RunOutcome};
pub use window::TimeWindow;
