use crate::imaging::equalize::equalize_in_place;
use crate::pipeline::stage::{PipelineStage, StageError};
use crate::shared::record::FrameRecord;

/// Histogram-equalizes the downscaled image to stabilize detection under
/// varying illumination.
pub struct EqualizeStage;

impl PipelineStage for EqualizeStage {
    fn name(&self) -> &'static str {
        "equalize"
    }

    fn apply(&mut self, mut record: FrameRecord) -> Result<FrameRecord, StageError> {
        let small = record
            .small
            .as_mut()
            .ok_or("record has no downscaled image")?;
        equalize_in_place(small);
        Ok(record)
    }
}
