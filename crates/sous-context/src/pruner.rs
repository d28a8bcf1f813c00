//! Visual-context pruning: strip stale images, inject fresh frames.

use sous_core::{ChatMessage, ContentPart};
use sous_vision::{FrameEncoder, VideoFrame};
use tracing::warn;

/// Remove image parts from every message except the most recent
/// `keep_last`. Text parts are left intact; messages without images are
/// untouched. Holds for any history length.
pub fn strip_stale_images(messages: &mut [ChatMessage], keep_last: usize) {
    let cutoff = messages.len().saturating_sub(keep_last);
    for message in &mut messages[..cutoff] {
        message.strip_images();
    }
}

/// Encode up to `max_frames` of the newest frames (oldest-to-newest) and
/// insert them into `message` ahead of its trailing text part, so the
/// temporal sequence reads in order. An empty frame slice leaves the
/// message unchanged; a frame that fails to encode is skipped, never
/// failing the turn.
pub fn inject_frames(
    message: &mut ChatMessage,
    frames: &[VideoFrame],
    encoder: &dyn FrameEncoder,
    max_frames: usize,
) {
    let start = frames.len().saturating_sub(max_frames);
    for frame in &frames[start..] {
        match encoder.encode(frame) {
            Ok(data_url) => message.push_image_before_text(ContentPart::image(data_url)),
            Err(err) => {
                warn!(error = %err, "skipping frame that failed to encode");
            }
        }
    }
}
