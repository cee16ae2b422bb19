//! Collaborator contracts consumed by the context governor.
//!
//! Token counting and tool-pair repair live outside the governor; it only
//! calls through these traits. Closures implement both traits so callers can
//! plug in ad hoc collaborators without a wrapper type.

use crate::message::Message;

/// Approximates the token cost of a single message.
///
/// Implementations must be deterministic for a given message.
pub trait TokenEstimator: Send + Sync {
    fn estimate(&self, message: &Message) -> usize;

    /// Sum of per-message estimates.
    fn estimate_all(&self, messages: &[Message]) -> usize {
        messages.iter().map(|msg| self.estimate(msg)).sum()
    }
}

impl<F> TokenEstimator for F
where
    F: Fn(&Message) -> usize + Send + Sync,
{
    fn estimate(&self, message: &Message) -> usize {
        self(message)
    }
}

/// Removes orphaned tool-invocation / tool-result entries.
///
/// Must preserve the relative order of surviving messages and never
/// introduce new ones.
pub trait PairSanitizer: Send + Sync {
    fn sanitize(&self, messages: Vec<Message>) -> Vec<Message>;
}

impl<F> PairSanitizer for F
where
    F: Fn(Vec<Message>) -> Vec<Message> + Send + Sync,
{
    fn sanitize(&self, messages: Vec<Message>) -> Vec<Message> {
        self(messages)
    }
}
