use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Exit codes: 0 = completed, negative <= positive; 1 = completed, negative
/// > positive; 2 = the run failed to complete.
const EXIT_NEGATIVE_MAJORITY: u8 = 1;
const EXIT_RUN_FAILED: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "mentionbot")]
#[command(about = "Monitors Reddit, Twitter, and Bluesky for product mentions")]
struct Cli {
    /// Hours back to search (default: CHECK_INTERVAL_HOURS from config)
    #[arg(long)]
    hours: Option<u32>,

    /// Don't save results to file
    #[arg(long)]
    no_save: bool,

    /// Configuration file path
    #[arg(long, default_value = ".env")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenvy::from_path(&cli.config).ok();

    let config = match mentionbot_core::load_app_config_from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::from(EXIT_RUN_FAILED);
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        product = %config.product_name,
        keywords = ?config.keywords,
        subreddits = ?config.subreddits,
        "mentionbot initialized"
    );

    let hours_back = cli.hours.unwrap_or(config.check_interval_hours);

    let outcome = match mentionbot_pipeline::run_check(&config, hours_back).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "mention check failed");
            return ExitCode::from(EXIT_RUN_FAILED);
        }
    };

    if !cli.no_save && !outcome.mentions.is_empty() {
        match mentionbot_pipeline::save_mentions(&outcome.mentions, None, chrono::Utc::now()) {
            Ok(path) => tracing::info!(path = %path.display(), "mentions saved"),
            Err(e) => tracing::error!(error = %e, "failed to save mentions"),
        }
    }

    println!("{}", outcome.report);

    if outcome.summary.negative > outcome.summary.positive {
        tracing::warn!("more negative mentions than positive detected");
        ExitCode::from(EXIT_NEGATIVE_MAJORITY)
    } else {
        ExitCode::SUCCESS
    }
}
