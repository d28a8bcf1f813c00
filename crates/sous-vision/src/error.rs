//! Error types for frame capture and encoding

use thiserror::Error;

/// Errors surfaced by a live video source. All of these are treated as
/// transient by the sampler: it logs, tears down the stream, and restarts
/// discovery.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("video track ended")]
    TrackEnded,

    #[error("video stream error: {0}")]
    Stream(String),
}

/// Errors from converting a frame into a model-consumable image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("empty frame payload")]
    EmptyFrame,

    #[error("encode failed: {0}")]
    Failed(String),
}
