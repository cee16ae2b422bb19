use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use convoguard_core::{
    CharRatioEstimator, CompactionSettings, ContextGovernor, GovernOutcome, GovernorConfig,
    Message, Strategy, ToolPairSanitizer, parse_transcript,
};

use crate::cli::{FallbackArgs, GovernArgs, OutputFormat, TranscriptArgs, TrimArgs};
use crate::output::{print_json, write_transcript};

type Governor = ContextGovernor<CharRatioEstimator, ToolPairSanitizer>;

fn read_transcript(path: &Path) -> Result<Vec<Message>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript {}", path.display()))?;
    parse_transcript(&content).with_context(|| format!("Failed to load {}", path.display()))
}

fn build_governor(settings: CompactionSettings, args: &TranscriptArgs) -> Governor {
    let estimator = CharRatioEstimator {
        chars_per_token: args.chars_per_token,
        overhead_tokens: args.overhead_tokens,
    };
    ContextGovernor::with_settings(estimator, ToolPairSanitizer, settings)
}

fn report(
    before: usize,
    outcome: &GovernOutcome,
    args: &TranscriptArgs,
    format: OutputFormat,
) -> Result<()> {
    if let Some(path) = &args.output {
        write_transcript(path, &outcome.messages)?;
    }

    if format.is_json() {
        return print_json(outcome);
    }

    let label = match outcome.strategy {
        Strategy::Untouched => "untouched".green(),
        Strategy::Trimmed => "trimmed".yellow(),
        Strategy::Fallback => "fallback".red(),
    };
    println!(
        "{} {} -> {} messages, ~{} tokens",
        label,
        before,
        outcome.messages.len(),
        outcome.tokens_after
    );
    if let Some(path) = &args.output {
        println!("  written to {}", path.display().to_string().dimmed());
    }
    Ok(())
}

pub fn trim(config: &GovernorConfig, args: TrimArgs, format: OutputFormat) -> Result<()> {
    let Some(target) = args.target.or(config.compaction.target_tokens) else {
        bail!("No token target: pass --target or set compaction.target_tokens");
    };

    let messages = read_transcript(&args.transcript)?;
    let governor = build_governor(CompactionSettings::from(config), &args.transcript_args);
    let before = messages.len();
    let outcome = governor.enforce_target(messages, target);

    report(before, &outcome, &args.transcript_args, format)
}

pub fn fallback(config: &GovernorConfig, args: FallbackArgs, format: OutputFormat) -> Result<()> {
    let mut settings = CompactionSettings::from(config);
    if let Some(percent) = args.retain_percent {
        settings.retain_percent = percent;
    }

    let messages = read_transcript(&args.transcript)?;
    let governor = build_governor(settings, &args.transcript_args);
    let outcome = governor.fallback(&messages);

    report(messages.len(), &outcome, &args.transcript_args, format)
}

pub fn govern(config: &GovernorConfig, args: GovernArgs, format: OutputFormat) -> Result<()> {
    let original = read_transcript(&args.original)?;
    // Only a missing --compacted means the compaction step failed; an
    // unreadable file is a user error.
    let compacted: Result<Vec<Message>> = match &args.compacted {
        Some(path) => Ok(read_transcript(path)?),
        None => Err(anyhow::anyhow!("no compacted transcript supplied")),
    };

    let governor = build_governor(CompactionSettings::from(config), &args.transcript_args);
    let before = match &compacted {
        Ok(candidate) => candidate.len(),
        Err(_) => original.len(),
    };
    let outcome = governor.govern(&original, compacted, args.context_tokens);

    report(before, &outcome, &args.transcript_args, format)
}
