//! Configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::ProgressConfig;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("channel cannot be empty")]
    EmptyChannel,

    #[error("commit ref cannot be empty")]
    EmptyCommit,

    #[error("invalid year: {0}. Must be a four-digit year")]
    InvalidYear(String),

    #[error("invalid max_retries: {0}. Must be at least 1")]
    InvalidMaxRetries(u32),

    #[error(
        "invalid backoff configuration: initial_backoff_ms ({0}) must not exceed max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .wpt-progress/config.yaml
    /// 3. Environment variables (WPT_PROGRESS_* prefix)
    pub fn load() -> Result<ProgressConfig> {
        let config: ProgressConfig = Figment::new()
            .merge(Serialized::defaults(ProgressConfig::default()))
            .merge(Yaml::file(".wpt-progress/config.yaml"))
            .merge(Env::prefixed("WPT_PROGRESS_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<ProgressConfig> {
        let config: ProgressConfig = Figment::new()
            .merge(Serialized::defaults(ProgressConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context("Failed to extract configuration from file")?;

        Self::validate(&config)?;
        Ok(config)
    }

    pub fn validate(config: &ProgressConfig) -> Result<(), ConfigError> {
        if config.channel.trim().is_empty() {
            return Err(ConfigError::EmptyChannel);
        }
        if config.commit.trim().is_empty() {
            return Err(ConfigError::EmptyCommit);
        }
        if config.year.len() != 4 || !config.year.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidYear(config.year.clone()));
        }
        if config.retry.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(config.retry.max_retries));
        }
        if config.retry.initial_backoff_ms > config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }
        if config.retry.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.retry.timeout_secs));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::models::RetryConfig;

    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(ConfigLoader::validate(&ProgressConfig::default()).is_ok());
    }

    #[test]
    fn rejects_empty_channel() {
        let config = ProgressConfig {
            channel: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyChannel)
        ));
    }

    #[test]
    fn rejects_bad_year() {
        let config = ProgressConfig {
            year: "25".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidYear(_))
        ));
    }

    #[test]
    fn rejects_inverted_backoff() {
        let config = ProgressConfig {
            retry: RetryConfig {
                initial_backoff_ms: 60_000,
                max_backoff_ms: 1_000,
                ..RetryConfig::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBackoff(60_000, 1_000))
        ));
    }

    #[test]
    fn loads_overrides_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "channel: autoland\nscan: true\nyear: \"2024\"\n").unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.channel, "autoland");
        assert!(config.scan);
        assert_eq!(config.year, "2024");
        // Untouched fields keep their defaults
        assert_eq!(config.commit, "tip");
    }
}
