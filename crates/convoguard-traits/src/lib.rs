//! Convoguard Traits - transcript model and collaborator contracts.
//!
//! This crate provides the shared interfaces used across the convoguard workspace:
//! - Message, Role, MessageContent, ContentBlock
//! - TokenEstimator and PairSanitizer, the two collaborators the governor consumes

pub mod collaborator;
pub mod message;

// ── Top-level re-exports ─────────────────────────────────────────────

pub use collaborator::{PairSanitizer, TokenEstimator};
pub use message::{ContentBlock, Message, MessageContent, Role};
