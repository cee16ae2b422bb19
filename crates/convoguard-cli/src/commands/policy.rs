use anyhow::Result;
use colored::Colorize;
use convoguard_core::{GovernorConfig, RetryPolicy};

use crate::cli::{OutputFormat, PolicyArgs};
use crate::output::print_json;
use crate::settings::failover_overrides;

pub fn run(config: &GovernorConfig, args: PolicyArgs, format: OutputFormat) -> Result<()> {
    let policy = RetryPolicy::resolve(Some(&failover_overrides(config, &args)));

    if format.is_json() {
        return print_json(&policy);
    }

    let schedule = policy
        .backoff_schedule_ms
        .iter()
        .map(|ms| format!("{ms}ms"))
        .collect::<Vec<_>>()
        .join(", ");

    println!("{}", "Retry policy".bold());
    println!("  max retries:      {}", policy.max_retries);
    println!(
        "  backoff schedule: {}",
        if schedule.is_empty() {
            "(empty, 300ms floor)".dimmed().to_string()
        } else {
            schedule
        }
    );
    Ok(())
}
