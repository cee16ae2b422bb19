//! Keeping a transcript inside its token budget.
//!
//! - [`trim`]: token-aware trimming that pins the summary and keeps the newest tail
//! - [`fallback`]: size-based retention when summarizing compaction is unavailable
//! - [`governor`]: chooses between the two after an external compaction step

pub mod fallback;
pub mod governor;
pub mod trim;

pub use fallback::{
    DEFAULT_FALLBACK_RETAIN_PERCENT, FallbackOutcome, fallback_compact, retained_count,
};
pub use governor::{
    CompactionSettings, ContextGovernor, DEFAULT_COMPACTION_TARGET_RATIO, GovernOutcome, Strategy,
};
pub use trim::{TrimOutcome, trim_to_target_tokens};
