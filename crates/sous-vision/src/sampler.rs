//! Two-stage frame sampling pipeline.
//!
//! A drain task consumes every inbound frame at stream rate and keeps only
//! the latest in a [`FrameCell`]; a fixed-period sample loop copies that
//! frame into the shared buffer. The surrounding discovery loop is
//! self-healing: stream loss clears the visual context and restarts
//! discovery, and only session cancellation ends it.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::buffer::SharedFrameBuffer;
use crate::cell::FrameCell;
use crate::source::{FrameStream, VideoSource};

/// Sampling cadence and recovery timing.
#[derive(Debug, Clone, Copy)]
pub struct SamplerConfig {
    /// Period between copies of the latest frame into the buffer (~2 Hz).
    pub sample_period: Duration,
    /// Poll period while waiting for a camera track to appear.
    pub discovery_interval: Duration,
    /// Pause before re-entering discovery after a stream ends or errors.
    pub restart_backoff: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sample_period: Duration::from_millis(500),
            discovery_interval: Duration::from_secs(1),
            restart_backoff: Duration::from_secs(1),
        }
    }
}

/// Drives a [`VideoSource`] into a [`SharedFrameBuffer`].
pub struct FrameSampler {
    source: Arc<dyn VideoSource>,
    buffer: SharedFrameBuffer,
    cell: FrameCell,
    config: SamplerConfig,
}

impl FrameSampler {
    pub fn new(
        source: Arc<dyn VideoSource>,
        buffer: SharedFrameBuffer,
        cell: FrameCell,
        config: SamplerConfig,
    ) -> Self {
        Self {
            source,
            buffer,
            cell,
            config,
        }
    }

    /// Supervisory loop. Runs until `cancel` fires; stream faults restart
    /// discovery and are never surfaced to the conversation.
    pub async fn run(self, cancel: CancellationToken) {
        loop {
            if cancel.is_cancelled() {
                break;
            }

            let Some(stream) = self.source.acquire().await else {
                // No camera track: visual context must not go stale.
                self.buffer.clear();
                self.cell.clear();
                tokio::select! {
                    () = cancel.cancelled() => break,
                    () = sleep(self.config.discovery_interval) => {}
                }
                continue;
            };

            self.capture(stream, &cancel).await;

            self.buffer.clear();
            self.cell.clear();
            if cancel.is_cancelled() {
                break;
            }
            debug!("video capture interrupted, restarting discovery");
            tokio::select! {
                () = cancel.cancelled() => break,
                () = sleep(self.config.restart_backoff) => {}
            }
        }
        debug!("frame sampler stopped");
    }

    /// Run drain + sample stages against one stream until it ends, errors,
    /// or the session is cancelled. The drain task is always cancelled and
    /// awaited before returning, so no reader outlives the stream.
    async fn capture(&self, mut stream: FrameStream, cancel: &CancellationToken) {
        let cell = self.cell.clone();
        let drain = tokio::spawn(async move {
            while let Some(event) = stream.next().await {
                match event {
                    Ok(frame) => cell.store(frame),
                    Err(err) => {
                        debug!(error = %err, "video stream fault");
                        break;
                    }
                }
            }
        });

        let mut tick = interval(self.config.sample_period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = tick.tick() => {
                    if drain.is_finished() {
                        break;
                    }
                    if let Some(frame) = self.cell.load() {
                        self.buffer.append(frame);
                    }
                }
            }
        }

        drain.abort();
        let _ = drain.await;
    }
}
