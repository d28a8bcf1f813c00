//! Error types for session control

use thiserror::Error;

/// Session error type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid transition from {from} mode: {attempted}")]
    InvalidTransition {
        from: &'static str,
        attempted: &'static str,
    },
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
