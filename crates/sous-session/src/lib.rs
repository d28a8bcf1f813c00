//! Sous conversation session - mode state machine and turn-completion wiring.
//!
//! This crate provides:
//! - The Onboarding / Chef / Recipe mode machine with explicit transitions
//! - The turn-completion hook that prunes visual context, injects fresh
//!   frames, and triggers background compaction
//! - Session teardown via one cancellation token covering all background work

pub mod controller;
pub mod error;
pub mod mode;

pub use controller::SessionController;
pub use error::{SessionError, SessionResult};
pub use mode::{ConversationMode, Directive};

/// Prelude for common imports
pub mod prelude {
    pub use crate::controller::SessionController;
    pub use crate::error::{SessionError, SessionResult};
    pub use crate::mode::{ConversationMode, Directive};
}
