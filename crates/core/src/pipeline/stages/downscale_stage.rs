use crate::imaging::resize::downscale;
use crate::pipeline::stage::{PipelineStage, StageError};
use crate::shared::record::FrameRecord;

/// Shrinks the grayscale image by the configured factor; detection runs
/// on the result.
pub struct DownscaleStage {
    factor: f64,
}

impl DownscaleStage {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

impl PipelineStage for DownscaleStage {
    fn name(&self) -> &'static str {
        "downscale"
    }

    fn apply(&mut self, mut record: FrameRecord) -> Result<FrameRecord, StageError> {
        let gray = record
            .gray
            .as_ref()
            .ok_or("record has no grayscale image")?;
        record.small = Some(downscale(gray, self.factor));
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::Frame;

    fn record_with_gray(w: u32, h: u32) -> FrameRecord {
        let mut record = FrameRecord::new(Frame::new(vec![0u8; (w * h * 3) as usize], w, h, 3, 0));
        record.gray = Some(Frame::new(vec![128u8; (w * h) as usize], w, h, 1, 0));
        record
    }

    #[test]
    fn test_halves_dimensions_at_factor_two() {
        let record = DownscaleStage::new(2.0)
            .apply(record_with_gray(40, 20))
            .unwrap();
        let small = record.small.unwrap();
        assert_eq!(small.width(), 20);
        assert_eq!(small.height(), 10);
    }

    #[test]
    fn test_factor_one_keeps_dimensions() {
        let record = DownscaleStage::new(1.0)
            .apply(record_with_gray(7, 5))
            .unwrap();
        let small = record.small.unwrap();
        assert_eq!((small.width(), small.height()), (7, 5));
    }

    #[test]
    fn test_missing_grayscale_is_an_error() {
        let record = FrameRecord::new(Frame::new(vec![0u8; 12], 2, 2, 3, 0));
        assert!(DownscaleStage::new(2.0).apply(record).is_err());
    }
}
