//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can start with zero
//! configuration for local development. Sink URLs default to unset, in which
//! case deliveries are skipped with a warning.

use std::path::PathBuf;
use std::time::Duration;

use destiny_shared::constants::DEFAULT_DEDUP_VERSION;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Webhook receiving every submission.
    /// Env: `DESTINY_SINK_ALL_URL`
    /// Default: unset.
    pub all_sink_url: Option<String>,

    /// Webhook receiving at most one submission per device.
    /// Env: `DESTINY_SINK_UNIQUE_URL`
    /// Default: unset.
    pub unique_sink_url: Option<String>,

    /// Dedup policy version appended to the flag key.
    /// Env: `DESTINY_DEDUP_VERSION`
    /// Default: `v5_final`
    pub dedup_version: String,

    /// Per-request HTTP timeout.
    /// Env: `DESTINY_HTTP_TIMEOUT_SECS`
    /// Default: 10 s
    pub request_timeout: Duration,

    /// How long the CLI waits for in-flight deliveries before exiting.
    /// Env: `DESTINY_FLUSH_TIMEOUT_SECS`
    /// Default: 15 s
    pub flush_timeout: Duration,

    /// SQLite file. `None` means the platform data directory.
    /// Env: `DESTINY_DB_PATH`
    pub db_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            all_sink_url: None,
            unique_sink_url: None,
            dedup_version: DEFAULT_DEDUP_VERSION.to_string(),
            request_timeout: Duration::from_secs(10),
            flush_timeout: Duration::from_secs(15),
            db_path: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("DESTINY_SINK_ALL_URL") {
            config.all_sink_url = non_empty(url);
        }

        if let Some(url) = lookup("DESTINY_SINK_UNIQUE_URL") {
            config.unique_sink_url = non_empty(url);
        }

        if let Some(version) = lookup("DESTINY_DEDUP_VERSION") {
            match non_empty(version) {
                Some(v) => config.dedup_version = v,
                None => tracing::warn!("Empty DESTINY_DEDUP_VERSION, using default"),
            }
        }

        if let Some(val) = lookup("DESTINY_HTTP_TIMEOUT_SECS") {
            match parse_secs(&val) {
                Some(d) => config.request_timeout = d,
                None => {
                    tracing::warn!(value = %val, "Invalid DESTINY_HTTP_TIMEOUT_SECS, using default")
                }
            }
        }

        if let Some(val) = lookup("DESTINY_FLUSH_TIMEOUT_SECS") {
            match parse_secs(&val) {
                Some(d) => config.flush_timeout = d,
                None => {
                    tracing::warn!(value = %val, "Invalid DESTINY_FLUSH_TIMEOUT_SECS, using default")
                }
            }
        }

        if let Some(path) = lookup("DESTINY_DB_PATH").and_then(non_empty) {
            config.db_path = Some(PathBuf::from(path));
        }

        config
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_secs(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Some(Duration::from_secs(n)),
        _ => None,
    }
}
