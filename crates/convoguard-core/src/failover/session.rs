//! Per-session owner of the failover state.

use crate::config::FailoverConfig;

use super::controller::{FailoverDecision, FailoverState, FailureKind, decide};
use super::policy::RetryPolicy;

/// Failover bookkeeping for one agent session.
///
/// Owns the session's [`FailoverState`] and feeds each call outcome through
/// the controller. Not shared across sessions; the single outstanding model
/// call per session keeps updates sequential.
#[derive(Debug, Clone, Default)]
pub struct FailoverSession {
    policy: RetryPolicy,
    state: FailoverState,
}

impl FailoverSession {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: FailoverState::default(),
        }
    }

    /// Create a session with the policy resolved from a partial config
    pub fn from_config(config: &FailoverConfig) -> Self {
        Self::new(RetryPolicy::resolve(Some(config)))
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn state(&self) -> &FailoverState {
        &self.state
    }

    /// Record a classified failure and return the controller's decision.
    pub fn on_failure(
        &mut self,
        failure: FailureKind,
        profile_id: Option<&str>,
    ) -> FailoverDecision {
        let (decision, next) = decide(failure, profile_id, &self.state, &self.policy);
        self.state = next;
        decision
    }

    /// Classify an error message, then record it.
    pub fn on_error(&mut self, error: &str, profile_id: Option<&str>) -> FailoverDecision {
        self.on_failure(FailureKind::classify(error), profile_id)
    }

    /// A successful call ends any timeout streak.
    pub fn on_success(&mut self, profile_id: &str) {
        self.state.last_profile_id = Some(profile_id.to_string());
        self.state.last_timeout_profile_id = None;
        self.state.consecutive_timeouts = 0;
    }

    /// Forget all failure history.
    pub fn reset(&mut self) {
        self.state = FailoverState::default();
    }
}
