use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table};
use convoguard_core::{FailoverDecision, FailoverSession, FailureKind, GovernorConfig};
use serde::{Deserialize, Serialize};

use crate::cli::{FailoverArgs, OutputFormat};
use crate::output::{print_json, print_table};
use crate::settings::failover_overrides;

/// One recorded call failure. `kind` wins over classifying `error`.
#[derive(Debug, Deserialize)]
struct FailureEvent {
    #[serde(default)]
    profile: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    kind: Option<FailureKind>,
}

impl FailureEvent {
    fn kind(&self) -> FailureKind {
        self.kind.unwrap_or_else(|| {
            self.error
                .as_deref()
                .map(FailureKind::classify)
                .unwrap_or(FailureKind::Other)
        })
    }
}

#[derive(Debug, Serialize)]
struct ReplayStep {
    profile: Option<String>,
    kind: FailureKind,
    decision: FailoverDecision,
    consecutive_timeouts: u32,
}

fn read_events(path: &Path) -> Result<Vec<FailureEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid events file {}", path.display()))
}

pub fn run(config: &GovernorConfig, args: FailoverArgs, format: OutputFormat) -> Result<()> {
    let events = read_events(&args.events)?;
    let mut session = FailoverSession::from_config(&failover_overrides(config, &args.policy));

    let steps: Vec<ReplayStep> = events
        .into_iter()
        .map(|event| {
            let kind = event.kind();
            let decision = session.on_failure(kind, event.profile.as_deref());
            ReplayStep {
                profile: event.profile,
                kind,
                decision,
                consecutive_timeouts: session.state().consecutive_timeouts,
            }
        })
        .collect();

    if format.is_json() {
        return print_json(&steps);
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Profile", "Kind", "Decision", "Delay", "Streak"]);

    for (index, step) in steps.iter().enumerate() {
        let kind = match step.kind {
            FailureKind::Timeout => "timeout",
            FailureKind::Other => "other",
        };
        let decision = match step.decision {
            FailoverDecision::Retry { .. } => Cell::new("retry").fg(Color::Yellow),
            FailoverDecision::Rotate => Cell::new("rotate").fg(Color::Red),
        };
        let delay = step
            .decision
            .delay_ms()
            .map(|ms| format!("{ms}ms"))
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(step.profile.as_deref().unwrap_or("-")),
            Cell::new(kind),
            decision,
            Cell::new(delay),
            Cell::new(step.consecutive_timeouts),
        ]);
    }

    print_table(table)
}
