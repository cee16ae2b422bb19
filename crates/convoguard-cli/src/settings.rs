//! Config loading and command-line overrides

use std::path::Path;

use anyhow::Result;
use convoguard_core::GovernorConfig;
use convoguard_core::config::FailoverConfig;

use crate::cli::PolicyArgs;

/// Load the config file given on the command line, or the default one.
pub fn load_config(path: Option<&Path>) -> Result<GovernorConfig> {
    let config = match path {
        Some(path) => GovernorConfig::load_from_path(path)?,
        None => GovernorConfig::load()?,
    };
    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Layer retry flags over the `[failover]` section, field by field.
pub fn failover_overrides(config: &GovernorConfig, args: &PolicyArgs) -> FailoverConfig {
    FailoverConfig {
        max_retries: args.max_retries.or(config.failover.max_retries),
        backoff_schedule_ms: args
            .backoff_ms
            .clone()
            .or_else(|| config.failover.backoff_schedule_ms.clone()),
    }
}
