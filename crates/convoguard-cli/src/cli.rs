use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Output format for CLI commands
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

#[derive(Parser)]
#[command(name = "convoguard")]
#[command(version, about = "Convoguard - context budget and model failover for agent sessions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ~/.config/convoguard/config.toml)
    #[arg(long, global = true, env = "CONVOGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Trim a compacted transcript to a token target, pinning the first message
    Trim(TrimArgs),

    /// Keep only the newest fraction of a transcript
    Fallback(FallbackArgs),

    /// Apply the token budget to the outcome of a compaction step
    Govern(GovernArgs),

    /// Show the resolved retry policy
    Policy(PolicyArgs),

    /// Replay a sequence of call failures through the failover controller
    Failover(FailoverArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Token estimation and output options shared by transcript commands
#[derive(Args, Debug, Clone)]
pub struct TranscriptArgs {
    /// Characters per estimated token
    #[arg(long, default_value_t = 4)]
    pub chars_per_token: usize,

    /// Fixed token overhead added per message
    #[arg(long, default_value_t = 4)]
    pub overhead_tokens: usize,

    /// Write the resulting transcript to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Transcript JSON file (array of messages)
    pub transcript: PathBuf,

    /// Token target (defaults to compaction.target_tokens from config)
    #[arg(short, long)]
    pub target: Option<usize>,

    #[command(flatten)]
    pub transcript_args: TranscriptArgs,
}

#[derive(Args, Debug)]
pub struct FallbackArgs {
    /// Transcript JSON file (array of messages)
    pub transcript: PathBuf,

    /// Fraction of newest messages to keep (clamped to 0.05..=1.0)
    #[arg(short, long)]
    pub retain_percent: Option<f64>,

    #[command(flatten)]
    pub transcript_args: TranscriptArgs,
}

#[derive(Args, Debug)]
pub struct GovernArgs {
    /// Pre-compaction transcript JSON file
    pub original: PathBuf,

    /// Compacted transcript JSON file; omit when the compaction step failed
    #[arg(long)]
    pub compacted: Option<PathBuf>,

    /// Model context window in tokens
    #[arg(long, default_value_t = 128_000)]
    pub context_tokens: usize,

    #[command(flatten)]
    pub transcript_args: TranscriptArgs,
}

/// Retry policy overrides
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// Timeouts retried on the same profile before rotating
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Backoff schedule in milliseconds, comma separated
    #[arg(long, value_delimiter = ',')]
    pub backoff_ms: Option<Vec<u64>>,
}

#[derive(Args, Debug)]
pub struct FailoverArgs {
    /// JSON file with an array of failures: {"profile": "...", "error": "..."}
    pub events: PathBuf,

    #[command(flatten)]
    pub policy: PolicyArgs,
}
