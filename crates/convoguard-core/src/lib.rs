//! Convoguard Core - context governance for long-lived agent sessions
//!
//! This crate provides:
//! - Token-budget trimming that pins the compaction summary
//! - Size-based fallback retention when summarizing compaction fails
//! - Retry policy resolution, jittered backoff and retry-vs-rotate failover decisions
//! - An async failover loop with cancellation
//! - Reference token estimator and tool-pair sanitizer

pub mod compaction;
pub mod config;
pub mod error;
pub mod estimator;
pub mod failover;
pub mod sanitizer;

// Re-export commonly used types
pub use compaction::{
    CompactionSettings, ContextGovernor, FallbackOutcome, GovernOutcome, Strategy, TrimOutcome,
    fallback_compact, trim_to_target_tokens,
};
pub use config::GovernorConfig;
pub use error::{FailoverError, GovernorError, Result};
pub use estimator::CharRatioEstimator;
pub use failover::{
    FailoverDecision, FailoverSession, FailoverState, FailureKind, RetryPolicy, backoff_delay,
    decide, run_with_failover,
};
pub use sanitizer::ToolPairSanitizer;

pub use convoguard_traits::{
    ContentBlock, Message, MessageContent, PairSanitizer, Role, TokenEstimator,
};

/// Parse a JSON transcript (an array of messages).
pub fn parse_transcript(json: &str) -> Result<Vec<Message>> {
    Ok(serde_json::from_str(json)?)
}
