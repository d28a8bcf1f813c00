//! Context retention policy

use serde::{Deserialize, Serialize};

/// Bounds on how much conversation and visual context reaches the model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContextPolicy {
    /// Trigger async compaction when history grows past this many items.
    pub summarize_threshold: usize,
    /// Number of recent items left untouched by compaction.
    pub keep_recent_items: usize,
    /// Only the most recent N messages keep their image parts.
    pub keep_images_in_last: usize,
    /// Cap on frames injected into a single user turn.
    pub max_frames_per_turn: usize,
    /// Token budget for the synthesized summary.
    pub summary_max_tokens: u32,
}

impl Default for ContextPolicy {
    fn default() -> Self {
        Self {
            summarize_threshold: 24,
            keep_recent_items: 8,
            keep_images_in_last: 2,
            max_frames_per_turn: 3,
            summary_max_tokens: 300,
        }
    }
}
