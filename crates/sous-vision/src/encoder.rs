//! Frame-to-image encoding boundary.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::EncodeError;
use crate::frame::VideoFrame;

/// Converts a frame into a model-consumable inline image representation.
/// Which frames and how many is decided by the context layer; the pixel
/// format is this collaborator's concern.
pub trait FrameEncoder: Send + Sync {
    fn encode(&self, frame: &VideoFrame) -> Result<String, EncodeError>;
}

/// Encoder for sources that already deliver JPEG payloads: wraps the bytes
/// in a base64 `data:` URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegDataUrlEncoder;

impl FrameEncoder for JpegDataUrlEncoder {
    fn encode(&self, frame: &VideoFrame) -> Result<String, EncodeError> {
        if frame.is_empty() {
            return Err(EncodeError::EmptyFrame);
        }
        Ok(format!(
            "data:image/jpeg;base64,{}",
            STANDARD.encode(&frame.data)
        ))
    }
}
