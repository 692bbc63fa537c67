//! WorkerConfig - 起動時に一度だけ読む設定
//!
//! 環境変数（`TALLY_` prefix）から読み込む。実行中の再設定はしない。

use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::domain::WorkerError;

const ENV_PREFIX: &str = "TALLY";

/// SQS の long-poll 上限に合わせる
const MAX_POLL_WAIT_SECS: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    /// Queue endpoint (SQS-compatible URL).
    pub queue_connection_string: String,

    pub queue_name: String,

    #[serde(default = "default_queue_region")]
    pub queue_region: String,

    /// Long-poll wait per receive; also bounds shutdown latency.
    #[serde(default = "default_poll_wait_secs")]
    pub poll_wait_secs: u64,

    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_database_pool_size")]
    pub database_pool_size: usize,

    /// Recorded with every saved row.
    #[serde(default = "default_consumer_name")]
    pub consumer_name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

fn default_queue_region() -> String {
    "us-east-1".to_string()
}

fn default_poll_wait_secs() -> u64 {
    5
}

fn default_database_pool_size() -> usize {
    4
}

fn default_consumer_name() -> String {
    "tally-worker".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Json
}

impl WorkerConfig {
    /// Load from `TALLY_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Fail-fast checks that serde defaults can't express.
    pub fn validate(&self) -> Result<(), WorkerError> {
        if self.queue_connection_string.trim().is_empty() {
            return Err(WorkerError::Config(
                "queue_connection_string must not be empty".to_string(),
            ));
        }
        if self.queue_name.trim().is_empty() {
            return Err(WorkerError::Config("queue_name must not be empty".to_string()));
        }
        if self.database_pool_size == 0 {
            return Err(WorkerError::Config(
                "database_pool_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Poll wait clamped to what the transport accepts (1..=20s).
    pub fn poll_wait(&self) -> Duration {
        Duration::from_secs(self.poll_wait_secs.clamp(1, MAX_POLL_WAIT_SECS))
    }

    pub fn database_url(&self) -> Result<&str, WorkerError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| WorkerError::Config("database_url is required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn loads_required_fields_with_defaults() {
        let config = WorkerConfig::from_env(env(&[
            ("TALLY_QUEUE_CONNECTION_STRING", "http://localhost:9324"),
            ("TALLY_QUEUE_NAME", "resultados"),
        ]))
        .unwrap();

        assert_eq!(config.queue_connection_string, "http://localhost:9324");
        assert_eq!(config.queue_name, "resultados");
        assert_eq!(config.queue_region, "us-east-1");
        assert_eq!(config.poll_wait(), Duration::from_secs(5));
        assert_eq!(config.database_pool_size, 4);
        assert_eq!(config.consumer_name, "tally-worker");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.database_url().is_err());
        config.validate().unwrap();
    }

    #[test]
    fn overrides_are_applied() {
        let config = WorkerConfig::from_env(env(&[
            ("TALLY_QUEUE_CONNECTION_STRING", "http://sqs:4566"),
            ("TALLY_QUEUE_NAME", "contagem"),
            ("TALLY_POLL_WAIT_SECS", "2"),
            ("TALLY_DATABASE_URL", "postgres://tally@db/tally"),
            ("TALLY_LOG_FORMAT", "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.poll_wait(), Duration::from_secs(2));
        assert_eq!(config.database_url().unwrap(), "postgres://tally@db/tally");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn missing_queue_name_is_an_error() {
        let result = WorkerConfig::from_env(env(&[(
            "TALLY_QUEUE_CONNECTION_STRING",
            "http://localhost:9324",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn blank_queue_name_fails_validation() {
        let config = WorkerConfig::from_env(env(&[
            ("TALLY_QUEUE_CONNECTION_STRING", "http://localhost:9324"),
            ("TALLY_QUEUE_NAME", "  "),
        ]))
        .unwrap();
        assert!(matches!(config.validate(), Err(WorkerError::Config(_))));
    }

    #[test]
    fn poll_wait_is_clamped() {
        let mut config = WorkerConfig::from_env(env(&[
            ("TALLY_QUEUE_CONNECTION_STRING", "http://localhost:9324"),
            ("TALLY_QUEUE_NAME", "q"),
            ("TALLY_POLL_WAIT_SECS", "90"),
        ]))
        .unwrap();
        assert_eq!(config.poll_wait(), Duration::from_secs(20));

        config.poll_wait_secs = 0;
        assert_eq!(config.poll_wait(), Duration::from_secs(1));
    }
}
