//! Post-compaction budget enforcement.
//!
//! Wires the two retention strategies to the outcome of the external
//! summarizing step: a successful summary is trimmed to the token target, a
//! failed one falls back to size-based retention over the original transcript.

use std::fmt::Display;

use convoguard_traits::{Message, PairSanitizer, TokenEstimator};
use serde::Serialize;

use super::fallback::{DEFAULT_FALLBACK_RETAIN_PERCENT, fallback_compact};
use super::trim::trim_to_target_tokens;
use crate::config::GovernorConfig;

/// Default ratio of the context window used as the compaction target when no
/// explicit target is configured.
pub const DEFAULT_COMPACTION_TARGET_RATIO: f64 = 0.25;

/// Which retention strategy produced the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Compacted transcript already fit the target.
    Untouched,
    /// Compacted transcript was trimmed to the target.
    Trimmed,
    /// Compaction failed; newest fraction of the original kept.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GovernOutcome {
    pub strategy: Strategy,
    pub messages: Vec<Message>,
    pub tokens_after: usize,
}

/// Resolved budget settings for one governor.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactionSettings {
    pub target_tokens: Option<usize>,
    pub retain_percent: f64,
}

impl Default for CompactionSettings {
    fn default() -> Self {
        Self {
            target_tokens: None,
            retain_percent: DEFAULT_FALLBACK_RETAIN_PERCENT,
        }
    }
}

impl From<&GovernorConfig> for CompactionSettings {
    fn from(config: &GovernorConfig) -> Self {
        Self {
            target_tokens: config.compaction.target_tokens,
            retain_percent: config
                .fallback
                .retain_percent
                .unwrap_or(DEFAULT_FALLBACK_RETAIN_PERCENT),
        }
    }
}

/// Token budget governor over a pair of collaborators.
pub struct ContextGovernor<E, S> {
    estimator: E,
    sanitizer: S,
    settings: CompactionSettings,
}

impl<E, S> ContextGovernor<E, S>
where
    E: TokenEstimator,
    S: PairSanitizer,
{
    pub fn new(estimator: E, sanitizer: S) -> Self {
        Self::with_settings(estimator, sanitizer, CompactionSettings::default())
    }

    pub fn with_settings(estimator: E, sanitizer: S, settings: CompactionSettings) -> Self {
        Self {
            estimator,
            sanitizer,
            settings,
        }
    }

    pub fn settings(&self) -> &CompactionSettings {
        &self.settings
    }

    /// Token target for a model with `context_tokens` of context.
    pub fn target_tokens(&self, context_tokens: usize) -> usize {
        self.settings
            .target_tokens
            .unwrap_or_else(|| (context_tokens as f64 * DEFAULT_COMPACTION_TARGET_RATIO) as usize)
    }

    /// Apply the budget to the result of an external compaction step.
    ///
    /// `original` is the pre-compaction transcript, used only when
    /// `compacted` is an error.
    pub fn govern<Err: Display>(
        &self,
        original: &[Message],
        compacted: std::result::Result<Vec<Message>, Err>,
        context_tokens: usize,
    ) -> GovernOutcome {
        match compacted {
            Ok(candidate) => self.enforce_target(candidate, self.target_tokens(context_tokens)),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    retain_percent = self.settings.retain_percent,
                    "Compaction failed, falling back to size-based retention"
                );
                self.fallback(original)
            }
        }
    }

    /// Trim an already compacted transcript to `target_tokens`.
    pub fn enforce_target(&self, candidate: Vec<Message>, target_tokens: usize) -> GovernOutcome {
        match trim_to_target_tokens(&candidate, target_tokens, &self.estimator, &self.sanitizer) {
            Some(outcome) => GovernOutcome {
                strategy: Strategy::Trimmed,
                messages: outcome.trimmed,
                tokens_after: outcome.tokens_after,
            },
            None => {
                let tokens_after = self.estimator.estimate_all(&candidate);
                GovernOutcome {
                    strategy: Strategy::Untouched,
                    messages: candidate,
                    tokens_after,
                }
            }
        }
    }

    /// Size-based retention over `original`.
    pub fn fallback(&self, original: &[Message]) -> GovernOutcome {
        let outcome = fallback_compact(
            original,
            self.settings.retain_percent,
            &self.estimator,
            &self.sanitizer,
        );
        GovernOutcome {
            strategy: Strategy::Fallback,
            messages: outcome.messages,
            tokens_after: outcome.tokens_after,
        }
    }
}
