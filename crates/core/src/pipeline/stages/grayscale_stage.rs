use crate::imaging::grayscale::to_grayscale;
use crate::pipeline::stage::{PipelineStage, StageError};
use crate::shared::record::FrameRecord;

/// Produces the grayscale derivative of the original frame.
pub struct GrayscaleStage;

impl PipelineStage for GrayscaleStage {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn apply(&mut self, mut record: FrameRecord) -> Result<FrameRecord, StageError> {
        record.gray = Some(to_grayscale(&record.frame));
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::Frame;

    #[test]
    fn test_fills_grayscale_slot() {
        let frame = Frame::new(vec![200u8; 4 * 3 * 3], 4, 3, 3, 2);
        let record = GrayscaleStage.apply(FrameRecord::new(frame)).unwrap();

        let gray = record.gray.unwrap();
        assert!(gray.is_grayscale());
        assert_eq!(gray.width(), 4);
        assert_eq!(gray.height(), 3);
        assert_eq!(gray.index(), 2);
        // Original frame untouched.
        assert_eq!(record.frame.channels(), 3);
    }
}
