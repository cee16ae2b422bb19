//! Retry-same-profile vs rotate decisions after a model call failure.
//!
//! The controller is a pure function over an explicit per-session state. A
//! timeout on the profile that timed out last extends the streak; a timeout on
//! any other profile starts a new one; anything else clears it. While the
//! streak is within the policy's retry budget the same profile is retried
//! after a jittered delay, otherwise the caller should rotate.

use serde::{Deserialize, Serialize};

use super::backoff::backoff_delay;
use super::policy::RetryPolicy;

/// Classification of a failed model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    Other,
}

impl FailureKind {
    /// Classify an error message. Only timeouts are retried on the same
    /// profile; everything else is left to rotation.
    pub fn classify(error: &str) -> Self {
        let error_lower = error.to_lowercase();
        let timeout_patterns = ["timeout", "timed out", "deadline exceeded"];

        if timeout_patterns
            .iter()
            .any(|pattern| error_lower.contains(pattern))
        {
            Self::Timeout
        } else {
            Self::Other
        }
    }

    pub fn is_timeout(self) -> bool {
        matches!(self, Self::Timeout)
    }
}

/// Per-session failure counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailoverState {
    /// Profile of the most recent failure
    pub last_profile_id: Option<String>,
    /// Profile of the most recent timeout
    pub last_timeout_profile_id: Option<String>,
    /// Length of the current timeout streak on `last_timeout_profile_id`
    pub consecutive_timeouts: u32,
}

/// What the caller should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FailoverDecision {
    /// Retry the same profile after `delay_ms`
    Retry { delay_ms: u64 },
    /// Move on to another profile, or surface the failure
    Rotate,
}

impl FailoverDecision {
    pub fn is_retry(&self) -> bool {
        matches!(self, Self::Retry { .. })
    }

    pub fn delay_ms(&self) -> Option<u64> {
        match self {
            Self::Retry { delay_ms } => Some(*delay_ms),
            Self::Rotate => None,
        }
    }
}

/// Decide how to react to a failure, returning the decision and the next state.
pub fn decide(
    failure: FailureKind,
    failed_profile_id: Option<&str>,
    state: &FailoverState,
    policy: &RetryPolicy,
) -> (FailoverDecision, FailoverState) {
    decide_with(failure, failed_profile_id, state, policy, backoff_delay)
}

/// [`decide`] with an injectable delay function `(schedule, attempt) -> ms`.
pub fn decide_with<D>(
    failure: FailureKind,
    failed_profile_id: Option<&str>,
    state: &FailoverState,
    policy: &RetryPolicy,
    delay: D,
) -> (FailoverDecision, FailoverState)
where
    D: FnOnce(&[u64], usize) -> u64,
{
    let last_profile_id = failed_profile_id
        .map(str::to_string)
        .or_else(|| state.last_profile_id.clone());

    let profile_id = match failed_profile_id {
        Some(id) if failure.is_timeout() => id,
        _ => {
            let next = FailoverState {
                last_profile_id,
                last_timeout_profile_id: state.last_timeout_profile_id.clone(),
                consecutive_timeouts: 0,
            };
            return (FailoverDecision::Rotate, next);
        }
    };

    let consecutive = if state.last_timeout_profile_id.as_deref() == Some(profile_id) {
        state.consecutive_timeouts.saturating_add(1)
    } else {
        1
    };

    let next = FailoverState {
        last_profile_id,
        last_timeout_profile_id: Some(profile_id.to_string()),
        consecutive_timeouts: consecutive,
    };

    if consecutive <= policy.max_retries {
        let delay_ms = delay(&policy.backoff_schedule_ms, (consecutive - 1) as usize);
        tracing::debug!(
            profile = profile_id,
            attempt = consecutive,
            max_retries = policy.max_retries,
            delay_ms,
            "Timeout on profile, retrying same profile"
        );
        (FailoverDecision::Retry { delay_ms }, next)
    } else {
        tracing::info!(
            profile = profile_id,
            consecutive_timeouts = consecutive,
            max_retries = policy.max_retries,
            "Timeout retries exhausted, rotating profile"
        );
        (FailoverDecision::Rotate, next)
    }
}
