use serde::Serialize;

use crate::config::FailoverConfig;

pub const DEFAULT_MAX_RETRIES: u32 = 1;
pub const DEFAULT_BACKOFF_SCHEDULE_MS: [u64; 2] = [300, 1200];

/// Effective same-profile retry policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetryPolicy {
    /// Timeouts on one profile that are retried before rotating (0 = never)
    pub max_retries: u32,
    /// Base delay for each retry attempt; later attempts reuse the last entry
    pub backoff_schedule_ms: Vec<u64>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_schedule_ms: DEFAULT_BACKOFF_SCHEDULE_MS.to_vec(),
        }
    }
}

impl RetryPolicy {
    /// Merge a partial config with the defaults, field by field.
    ///
    /// An explicit `max_retries = 0` disables retries. An explicit schedule is
    /// taken as-is, even when empty.
    pub fn resolve(config: Option<&FailoverConfig>) -> Self {
        let Some(config) = config else {
            return Self::default();
        };
        Self {
            max_retries: config.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            backoff_schedule_ms: config
                .backoff_schedule_ms
                .clone()
                .unwrap_or_else(|| DEFAULT_BACKOFF_SCHEDULE_MS.to_vec()),
        }
    }

    /// Create a policy that never retries the same profile
    pub fn no_retries() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }
}

impl From<&FailoverConfig> for RetryPolicy {
    fn from(config: &FailoverConfig) -> Self {
        Self::resolve(Some(config))
    }
}
