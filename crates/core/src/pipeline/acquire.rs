use crate::capture::domain::frame_source::FrameSource;
use crate::pipeline::shutdown::ShutdownToken;
use crate::shared::record::FrameRecord;

/// Head of the pipeline: pulls frames from the source and starts a record
/// for each one.
///
/// Owns the termination decision for the input side — exhaustion, a read
/// error, or an already-requested shutdown all turn into `None`, and the
/// first two also raise the shutdown flag so the rest of the pipeline
/// winds down.
pub struct FrameAcquirer {
    source: Box<dyn FrameSource>,
    shutdown: ShutdownToken,
}

impl FrameAcquirer {
    pub fn new(source: Box<dyn FrameSource>, shutdown: ShutdownToken) -> Self {
        Self { source, shutdown }
    }

    pub fn acquire(&mut self) -> Option<FrameRecord> {
        if self.shutdown.is_requested() {
            return None;
        }
        match self.source.next_frame() {
            Ok(Some(frame)) => Some(FrameRecord::new(frame)),
            Ok(None) => {
                log::debug!("frame source exhausted");
                self.shutdown.request();
                None
            }
            Err(e) => {
                log::error!("frame read failed: {e}");
                self.shutdown.request();
                None
            }
        }
    }
}
