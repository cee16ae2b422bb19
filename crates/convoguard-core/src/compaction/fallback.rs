//! Size-based retention used when summarizing compaction fails.
//!
//! No summary exists to pin, so token weight is ignored: keep the newest
//! fraction of messages, repair tool pairs, and report the resulting estimate.

use convoguard_traits::{Message, PairSanitizer, TokenEstimator};

/// Default fraction of messages kept by the fallback.
pub const DEFAULT_FALLBACK_RETAIN_PERCENT: f64 = 0.2;
pub const MIN_RETAIN_PERCENT: f64 = 0.05;
pub const MAX_RETAIN_PERCENT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FallbackOutcome {
    pub messages: Vec<Message>,
    pub tokens_after: usize,
}

/// Number of newest messages the fallback keeps out of `len`.
///
/// `retain_percent` is clamped to `[0.05, 1.0]`; NaN falls back to the
/// default. Non-empty input always keeps at least one message.
pub fn retained_count(len: usize, retain_percent: f64) -> usize {
    if len == 0 {
        return 0;
    }
    let percent = if retain_percent.is_nan() {
        DEFAULT_FALLBACK_RETAIN_PERCENT
    } else {
        retain_percent.clamp(MIN_RETAIN_PERCENT, MAX_RETAIN_PERCENT)
    };
    let count = (len as f64 * percent).ceil() as usize;
    count.clamp(1, len)
}

/// Keep only the newest `retain_percent` of `messages`.
pub fn fallback_compact(
    messages: &[Message],
    retain_percent: f64,
    estimator: &dyn TokenEstimator,
    sanitizer: &dyn PairSanitizer,
) -> FallbackOutcome {
    if messages.is_empty() {
        return FallbackOutcome {
            messages: Vec::new(),
            tokens_after: 0,
        };
    }

    let keep = retained_count(messages.len(), retain_percent);
    let retained = messages[messages.len() - keep..].to_vec();

    let repaired = sanitizer.sanitize(retained);
    let tokens_after = estimator.estimate_all(&repaired);

    tracing::debug!(
        messages_before = messages.len(),
        retained = keep,
        messages_after = repaired.len(),
        tokens_after,
        "Fallback compaction applied"
    );

    FallbackOutcome {
        messages: repaired,
        tokens_after,
    }
}
