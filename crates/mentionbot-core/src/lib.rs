//! Shared domain types and configuration for mentionbot.
//!
//! Defines the canonical [`Mention`] record every platform is normalized
//! into, plus the env-driven [`AppConfig`] the binary and pipeline consume.

pub mod app_config;
pub mod config;
pub mod mention;

pub use app_config::{AppConfig, BlueskyCredentials, RedditCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use mention::{Mention, MentionKind, Platform, Sentiment, SentimentLabel};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
