//! Token-budget trimming after compaction.

use convoguard_traits::{Message, PairSanitizer, TokenEstimator};

/// Transcript cut down to a token ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimOutcome {
    pub trimmed: Vec<Message>,
    /// Estimate over `trimmed`, measured after pair repair.
    pub tokens_after: usize,
}

/// Trim the oldest messages until the estimated total fits `target_tokens`.
///
/// `messages[0]` (normally the compaction summary) is always kept. The
/// remaining budget is filled newest-first and the walk stops at the first
/// message that does not fit, so the kept tail is contiguous. Orphaned tool
/// pairs are repaired afterwards and the total is re-estimated.
///
/// Returns `None` when there is nothing to trim: an empty transcript or one
/// already within budget.
pub fn trim_to_target_tokens(
    messages: &[Message],
    target_tokens: usize,
    estimator: &dyn TokenEstimator,
    sanitizer: &dyn PairSanitizer,
) -> Option<TrimOutcome> {
    let (pinned, rest) = messages.split_first()?;

    let total_tokens = estimator.estimate_all(messages);
    if total_tokens <= target_tokens {
        return None;
    }

    let pinned_tokens = estimator.estimate(pinned);
    let mut candidate_tokens = 0;
    let mut tail_start = messages.len();

    for (offset, msg) in rest.iter().enumerate().rev() {
        let msg_tokens = estimator.estimate(msg);
        if pinned_tokens + candidate_tokens + msg_tokens > target_tokens {
            break;
        }
        candidate_tokens += msg_tokens;
        tail_start = offset + 1;
    }

    let mut kept = Vec::with_capacity(1 + messages.len() - tail_start);
    kept.push(pinned.clone());
    kept.extend_from_slice(&messages[tail_start..]);

    let trimmed = sanitizer.sanitize(kept);
    let tokens_after = estimator.estimate_all(&trimmed);

    tracing::debug!(
        messages_before = messages.len(),
        messages_after = trimmed.len(),
        tokens_before = total_tokens,
        tokens_after,
        target_tokens,
        "Trimmed transcript to token target"
    );

    Some(TrimOutcome {
        trimmed,
        tokens_after,
    })
}
