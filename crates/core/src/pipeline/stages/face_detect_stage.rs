use crate::detection::domain::region_detector::{DetectParams, RegionDetector};
use crate::imaging::flip::flip_horizontal;
use crate::pipeline::stage::{PipelineStage, StageError};
use crate::shared::record::FrameRecord;

/// Runs the primary (face) detector on the prepared image, optionally a
/// second time on its mirror image.
///
/// Mirrored detections are reprojected into original orientation before
/// they join the face list, so downstream stages never see flipped
/// coordinates.
pub struct FaceDetectStage {
    detector: Box<dyn RegionDetector>,
    params: DetectParams,
    mirror: bool,
}

impl FaceDetectStage {
    pub fn new(detector: Box<dyn RegionDetector>, mirror: bool) -> Self {
        Self {
            detector,
            params: DetectParams::faces(),
            mirror,
        }
    }
}

impl PipelineStage for FaceDetectStage {
    fn name(&self) -> &'static str {
        "detect_faces"
    }

    fn apply(&mut self, mut record: FrameRecord) -> Result<FrameRecord, StageError> {
        let small = record
            .small
            .take()
            .ok_or("record has no downscaled image")?;

        record.faces = self
            .detector
            .detect(&small, &self.params)
            .map_err(|e| -> StageError { e.to_string().into() })?;

        if self.mirror {
            let flipped = flip_horizontal(&small);
            let found = self
                .detector
                .detect(&flipped, &self.params)
                .map_err(|e| -> StageError { e.to_string().into() })?;
            record.mirrored_faces = found
                .into_iter()
                .map(|r| r.mirrored(small.width()))
                .collect();
            record.faces.extend(record.mirrored_faces.iter().copied());
        }

        record.small = Some(small);
        Ok(record)
    }
}
