//! Governor configuration file support
//!
//! Loads configuration from ~/.config/convoguard/config.toml. Every field is
//! optional; unset fields resolve to defaults at the point of use so that an
//! explicit zero stays distinguishable from "not configured".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GovernorError, Result};

/// Governor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GovernorConfig {
    #[serde(default)]
    pub compaction: CompactionConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub failover: FailoverConfig,
}

/// Post-compaction token budget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompactionConfig {
    /// Explicit token target; derived from the context window when unset
    pub target_tokens: Option<usize>,
}

/// Size-based fallback retention
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Fraction of newest messages to keep (clamped to 0.05..=1.0)
    pub retain_percent: Option<f64>,
}

/// Same-profile retry on timeout. Partial: see `RetryPolicy::resolve`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailoverConfig {
    /// Timeouts retried on the same profile before rotating (0 = never retry)
    #[serde(alias = "retry_same_profile_on_timeout")]
    pub max_retries: Option<u32>,
    /// Base delay per retry attempt in milliseconds
    #[serde(alias = "retry_backoff_ms")]
    pub backoff_schedule_ms: Option<Vec<u64>>,
}

impl GovernorConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path. A missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| GovernorError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| GovernorError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("convoguard").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GovernorConfig::load_from_path(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, GovernorConfig::default());
    }

    #[test]
    fn parses_all_sections() {
        let config: GovernorConfig = toml::from_str(
            r#"
            [compaction]
            target_tokens = 32000

            [fallback]
            retain_percent = 0.3

            [failover]
            max_retries = 2
            backoff_schedule_ms = [500, 1000, 2000]
            "#,
        )
        .unwrap();
        assert_eq!(config.compaction.target_tokens, Some(32_000));
        assert_eq!(config.fallback.retain_percent, Some(0.3));
        assert_eq!(config.failover.max_retries, Some(2));
        assert_eq!(
            config.failover.backoff_schedule_ms,
            Some(vec![500, 1000, 2000])
        );
    }

    #[test]
    fn accepts_legacy_failover_names() {
        let config: GovernorConfig = toml::from_str(
            r#"
            [failover]
            retry_same_profile_on_timeout = 0
            retry_backoff_ms = []
            "#,
        )
        .unwrap();
        assert_eq!(config.failover.max_retries, Some(0));
        assert_eq!(config.failover.backoff_schedule_ms, Some(vec![]));
    }

    #[test]
    fn empty_sections_stay_unset() {
        let config: GovernorConfig = toml::from_str("[failover]\n").unwrap();
        assert_eq!(config.failover, FailoverConfig::default());
    }

    #[test]
    fn invalid_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[failover]\nmax_retries = \"many\"").unwrap();
        let err = GovernorConfig::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, GovernorError::Config { .. }));
        assert!(err.to_string().contains("Invalid config"));
    }
}
