//! Decoded video frame handle.

use std::time::Instant;

use bytes::Bytes;

/// An opaque decoded video image with its capture timestamp.
///
/// The payload is reference-counted, so cloning a frame into the buffer or
/// out of the latest-frame cell is cheap. Frames are never mutated after
/// capture.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Bytes,
    pub captured_at: Instant,
}

impl VideoFrame {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            captured_at: Instant::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
