//! Sous context management - visual-context pruning and async history compaction.
//!
//! This crate provides:
//! - The retention policy for conversation history and visual context
//! - Image stripping and frame injection at turn completion
//! - Non-blocking background compaction of old turns into a summary

pub mod compactor;
pub mod error;
pub mod history;
pub mod policy;
pub mod pruner;
pub mod summarizer;

pub use compactor::HistoryCompactor;
pub use error::{ContextError, ContextResult};
pub use history::{CompactionState, ConversationHistory};
pub use policy::ContextPolicy;
pub use pruner::{inject_frames, strip_stale_images};
pub use summarizer::{transcript_lines, ModelSummarizer, Summarizer};

/// Prelude for common imports
pub mod prelude {
    pub use crate::compactor::HistoryCompactor;
    pub use crate::error::{ContextError, ContextResult};
    pub use crate::history::{CompactionState, ConversationHistory};
    pub use crate::policy::ContextPolicy;
    pub use crate::pruner::{inject_frames, strip_stale_images};
    pub use crate::summarizer::{transcript_lines, ModelSummarizer, Summarizer};
}
