//! Bounded most-recent-N frame buffer.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::frame::VideoFrame;

/// Default capacity: three frames at ~2 Hz gives the model a ~1.5 s window.
pub const DEFAULT_CAPACITY: usize = 3;

/// Fixed-capacity ring of sampled frames, oldest first.
///
/// Pure container: no internal synchronization. All mutation is serialized
/// by the owner; cross-task sharing goes through [`SharedFrameBuffer`].
#[derive(Debug)]
pub struct FrameBuffer {
    frames: VecDeque<VideoFrame>,
    capacity: usize,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a frame, evicting the oldest when full.
    pub fn append(&mut self, frame: VideoFrame) {
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    /// Current contents oldest-to-newest, without mutating the buffer.
    pub fn snapshot(&self) -> Vec<VideoFrame> {
        self.frames.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to a frame buffer.
///
/// The sampler task appends; the turn-completion path snapshots. The mutex
/// is the external locking boundary between those two contexts.
#[derive(Debug, Clone)]
pub struct SharedFrameBuffer {
    inner: Arc<Mutex<FrameBuffer>>,
}

impl SharedFrameBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FrameBuffer::with_capacity(capacity))),
        }
    }

    pub fn append(&self, frame: VideoFrame) {
        self.lock().append(frame);
    }

    pub fn snapshot(&self) -> Vec<VideoFrame> {
        self.lock().snapshot()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FrameBuffer> {
        self.inner.lock().expect("frame buffer lock poisoned")
    }
}

impl Default for SharedFrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
