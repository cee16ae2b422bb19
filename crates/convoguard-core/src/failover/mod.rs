//! Model failover after call failures.
//!
//! - [`policy`]: field-wise resolution of the retry policy
//! - [`backoff`]: jittered per-attempt delays
//! - [`controller`]: pure retry-vs-rotate decision over explicit state
//! - [`session`]: per-session owner of that state
//! - [`runner`]: async loop that applies decisions, sleeps and honours cancellation

pub mod backoff;
pub mod controller;
pub mod policy;
pub mod runner;
pub mod session;

pub use backoff::{backoff_delay, backoff_delay_with_jitter, base_delay_ms};
pub use controller::{FailoverDecision, FailoverState, FailureKind, decide, decide_with};
pub use policy::{DEFAULT_BACKOFF_SCHEDULE_MS, DEFAULT_MAX_RETRIES, RetryPolicy};
pub use runner::run_with_failover;
pub use session::FailoverSession;
