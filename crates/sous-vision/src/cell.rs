//! Single-value latest-frame register.

use std::sync::{Arc, Mutex};

use crate::frame::VideoFrame;

/// A one-slot register holding the most recent frame seen by the drain
/// stage. Deliberately not a queue: under bursty input, older undelivered
/// frames are overwritten rather than buffered, so the sampler never falls
/// behind the live stream.
#[derive(Debug, Clone, Default)]
pub struct FrameCell {
    slot: Arc<Mutex<Option<VideoFrame>>>,
}

impl FrameCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot unconditionally. Last write wins.
    pub fn store(&self, frame: VideoFrame) {
        *self.lock() = Some(frame);
    }

    /// Clone the current frame without clearing the slot.
    pub fn load(&self) -> Option<VideoFrame> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<VideoFrame>> {
        self.slot.lock().expect("frame cell lock poisoned")
    }
}
