//! Error types for context management

use thiserror::Error;

/// Context management error type
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("summarization call failed: {0}")]
    Summarization(#[from] sous_runtime::ClientError),
}

/// Result type for context operations
pub type ContextResult<T> = Result<T, ContextError>;
