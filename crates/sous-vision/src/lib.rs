//! Sous live-frame sampling - bounded frame buffer and capture supervision.
//!
//! This crate provides:
//! - A fixed-capacity, most-recent-N ring buffer of sampled video frames
//! - A single-value latest-frame register for rate decoupling
//! - A self-healing sampler that drains a live video source at full rate
//!   while copying into the buffer at a fixed low rate
//! - Boundary traits for the video source and the frame-to-image encoder

pub mod buffer;
pub mod cell;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod sampler;
pub mod source;

pub use buffer::{FrameBuffer, SharedFrameBuffer};
pub use cell::FrameCell;
pub use encoder::{FrameEncoder, JpegDataUrlEncoder};
pub use error::{EncodeError, SourceError};
pub use frame::VideoFrame;
pub use sampler::{FrameSampler, SamplerConfig};
pub use source::{channel_stream, FrameStream, MockVideoSource, VideoSource};

/// Prelude for common imports
pub mod prelude {
    pub use crate::buffer::{FrameBuffer, SharedFrameBuffer};
    pub use crate::cell::FrameCell;
    pub use crate::encoder::{FrameEncoder, JpegDataUrlEncoder};
    pub use crate::error::{EncodeError, SourceError};
    pub use crate::frame::VideoFrame;
    pub use crate::sampler::{FrameSampler, SamplerConfig};
    pub use crate::source::{channel_stream, FrameStream, MockVideoSource, VideoSource};
}
