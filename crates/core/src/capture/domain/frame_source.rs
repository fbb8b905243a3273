use crate::shared::frame::Frame;

/// Produces the raw frame sequence the pipeline consumes.
///
/// `Ok(None)` signals normal exhaustion; `Err` is a failed read. Either
/// way the stream is over — the pipeline never retries a read.
pub trait FrameSource: Send {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;
}
