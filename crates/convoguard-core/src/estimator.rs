//! Character-ratio token estimation.
//!
//! A cheap stand-in for a real tokenizer: text bytes divided by a fixed
//! characters-per-token ratio, plus a constant per-message overhead for the
//! role and framing tokens.

use convoguard_traits::{Message, TokenEstimator};

pub const CHARS_PER_TOKEN: usize = 4;
pub const ROLE_OVERHEAD_TOKENS: usize = 4;

#[derive(Debug, Clone, Copy)]
pub struct CharRatioEstimator {
    pub chars_per_token: usize,
    pub overhead_tokens: usize,
}

impl Default for CharRatioEstimator {
    fn default() -> Self {
        Self {
            chars_per_token: CHARS_PER_TOKEN,
            overhead_tokens: ROLE_OVERHEAD_TOKENS,
        }
    }
}

impl CharRatioEstimator {
    /// Estimator without per-message overhead, i.e. a pure `len / ratio`.
    pub fn without_overhead(chars_per_token: usize) -> Self {
        Self {
            chars_per_token,
            overhead_tokens: 0,
        }
    }
}

impl TokenEstimator for CharRatioEstimator {
    fn estimate(&self, message: &Message) -> usize {
        // A zero ratio would divide by zero; treat it as one char per token.
        message.text_len() / self.chars_per_token.max(1) + self.overhead_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_basic_message() {
        let est = CharRatioEstimator::default();
        // 11/4 + 4 = 6
        assert_eq!(est.estimate(&Message::user("hello world")), 6);
    }

    #[test]
    fn estimate_empty_content_is_overhead_only() {
        let est = CharRatioEstimator::default();
        assert_eq!(est.estimate(&Message::user("")), ROLE_OVERHEAD_TOKENS);
    }

    #[test]
    fn estimate_tool_result_with_id() {
        let est = CharRatioEstimator::default();
        let msg = Message::tool_result("call_abc123", "result content here");
        // (11 + 19) / 4 + 4 = 11
        assert_eq!(est.estimate(&msg), 11);
    }

    #[test]
    fn estimate_large_message() {
        let est = CharRatioEstimator::default();
        let msg = Message::user("x".repeat(40_000));
        assert_eq!(est.estimate(&msg), 10_004);
    }

    #[test]
    fn zero_ratio_does_not_panic() {
        let est = CharRatioEstimator::without_overhead(0);
        assert_eq!(est.estimate(&Message::user("abc")), 3);
    }
}
