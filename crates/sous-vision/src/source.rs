//! Video source boundary.
//!
//! The real implementation sits on the real-time transport layer (camera
//! track subscription); this crate only needs an async stream of frames and
//! a way to ask whether a camera track currently exists.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::SourceError;
use crate::frame::VideoFrame;

/// Live frame events from a single camera track.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<VideoFrame, SourceError>> + Send>>;

/// Discovers the currently published camera track, if any.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Returns a frame stream for the current camera track, or `None` when
    /// no participant is publishing video. The stream may end or error at
    /// any time; callers are expected to re-acquire.
    async fn acquire(&self) -> Option<FrameStream>;
}

/// Build a frame stream fed through a channel. Used by tests and by
/// transport adapters that push frames from a callback.
pub fn channel_stream(capacity: usize) -> (mpsc::Sender<Result<VideoFrame, SourceError>>, FrameStream) {
    let (tx, rx) = mpsc::channel(capacity);
    (tx, Box::pin(ReceiverStream::new(rx)))
}

/// Test source with a queue of scripted `acquire` results. Once the queue
/// is exhausted, every further acquire reports no camera track.
#[derive(Default)]
pub struct MockVideoSource {
    streams: Mutex<VecDeque<Option<FrameStream>>>,
}

impl MockVideoSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, stream: Option<FrameStream>) {
        self.streams
            .lock()
            .expect("mock source queue poisoned")
            .push_back(stream);
    }
}

#[async_trait]
impl VideoSource for MockVideoSource {
    async fn acquire(&self) -> Option<FrameStream> {
        self.streams
            .lock()
            .expect("mock source queue poisoned")
            .pop_front()
            .flatten()
    }
}
