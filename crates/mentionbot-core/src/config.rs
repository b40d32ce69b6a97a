use crate::app_config::{AppConfig, BlueskyCredentials, RedditCredentials};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a configured value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, which is useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a configured value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup, no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let product_name = or_default("PRODUCT_NAME", "Ansible");

    let keywords = split_list(&or_default("KEYWORDS", "ansible"));
    if keywords.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "KEYWORDS".to_string(),
            reason: "no keywords configured".to_string(),
        });
    }

    let subreddits = split_list(&or_default("SUBREDDITS", "ansible,devops"));

    let check_interval_hours = parse_u32("CHECK_INTERVAL_HOURS", "4")?;
    let log_level = or_default("MENTIONBOT_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("MENTIONBOT_REQUEST_TIMEOUT_SECS", "30")?;
    let top_mentions = parse_usize("MENTIONBOT_TOP_MENTIONS", "5")?;

    // A credential group is configured only when every member is present;
    // a partial group leaves the platform disabled.
    let reddit = match (
        lookup("REDDIT_CLIENT_ID"),
        lookup("REDDIT_CLIENT_SECRET"),
        lookup("REDDIT_USER_AGENT"),
    ) {
        (Ok(client_id), Ok(client_secret), Ok(user_agent)) => Some(RedditCredentials {
            client_id,
            client_secret,
            user_agent,
        }),
        _ => None,
    };

    let twitter_bearer_token = lookup("TWITTER_BEARER_TOKEN").ok();

    let bluesky = match (lookup("BLUESKY_USERNAME"), lookup("BLUESKY_PASSWORD")) {
        (Ok(identifier), Ok(password)) => Some(BlueskyCredentials {
            identifier,
            password,
        }),
        _ => None,
    };

    Ok(AppConfig {
        product_name,
        keywords,
        subreddits,
        check_interval_hours,
        log_level,
        request_timeout_secs,
        top_mentions,
        reddit,
        twitter_bearer_token,
        bluesky,
    })
}

/// Split a comma-separated env value into trimmed, non-empty entries.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}
