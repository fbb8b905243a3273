use crate::detection::domain::region_detector::{DetectParams, RegionDetector};
use crate::detection::domain::smile_intensity::SmileIntensity;
use crate::imaging::crop::crop;
use crate::imaging::draw::{draw_circle, draw_rect_outline, fill_rect, PALETTE};
use crate::pipeline::stage::{PipelineStage, StageError};
use crate::shared::record::FrameRecord;
use crate::shared::region::Region;

const OUTLINE_THICKNESS: i32 = 3;

/// Final transformation stage: searches each face's lower half for smile
/// candidates and draws all overlays into the original frame.
///
/// Overlays: a palette-colored circle (near-square faces) or rectangle
/// outline per face, and an intensity bar along the left edge whose height
/// tracks the normalized smile-candidate count. The intensity window is
/// owned here, one per pipeline, and advances in frame order because the
/// stage is serial.
pub struct SmileAnnotateStage {
    detector: Box<dyn RegionDetector>,
    params: DetectParams,
    scale: f64,
    intensity: SmileIntensity,
}

impl SmileAnnotateStage {
    /// `scale` maps downscaled-image coordinates back onto the original
    /// frame (the downscale factor).
    pub fn new(detector: Box<dyn RegionDetector>, scale: f64) -> Self {
        Self {
            detector,
            params: DetectParams::smiles(),
            scale,
            intensity: SmileIntensity::new(),
        }
    }

    fn draw_face_overlay(&self, record: &mut FrameRecord, face: &Region, color_index: usize) {
        let color = PALETTE[color_index % PALETTE.len()];
        let s = self.scale;
        if face.is_near_square() {
            let cx = ((face.x as f64 + face.width as f64 * 0.5) * s).round() as i32;
            let cy = ((face.y as f64 + face.height as f64 * 0.5) * s).round() as i32;
            let radius = ((face.width + face.height) as f64 * 0.25 * s).round() as i32;
            draw_circle(&mut record.frame, cx, cy, radius, color, OUTLINE_THICKNESS);
        } else {
            let x0 = (face.x as f64 * s).round() as i32;
            let y0 = (face.y as f64 * s).round() as i32;
            let x1 = ((face.x + face.width - 1) as f64 * s).round() as i32;
            let y1 = ((face.y + face.height - 1) as f64 * s).round() as i32;
            draw_rect_outline(&mut record.frame, x0, y0, x1, y1, color, OUTLINE_THICKNESS);
        }
    }

    fn draw_intensity_bar(&self, record: &mut FrameRecord, intensity: f64) {
        let h = record.frame.height() as i32;
        let w = record.frame.width() as i32;
        let bar_height = (h as f64 * intensity).round() as i32;
        let color = [(255.0 * intensity).round() as u8, 0, 0];
        fill_rect(&mut record.frame, 0, h - 1, w / 10, h - 1 - bar_height, color);
    }
}

impl PipelineStage for SmileAnnotateStage {
    fn name(&self) -> &'static str {
        "annotate"
    }

    fn apply(&mut self, mut record: FrameRecord) -> Result<FrameRecord, StageError> {
        let small = record
            .small
            .take()
            .ok_or("record has no downscaled image")?;
        let faces = std::mem::take(&mut record.faces);

        for (i, face) in faces.iter().enumerate() {
            self.draw_face_overlay(&mut record, face, i);

            // Smiles only appear in the lower half of a face.
            let roi = face.lower_half();
            let found = match crop(&small, roi) {
                Some(patch) => self
                    .detector
                    .detect(&patch, &self.params)
                    .map_err(|e| -> StageError { e.to_string().into() })?
                    .into_iter()
                    .map(|r| Region::new(r.x + roi.x, r.y + roi.y, r.width, r.height))
                    .collect(),
                None => Vec::new(),
            };

            let intensity = self.intensity.observe(found.len());
            self.draw_intensity_bar(&mut record, intensity);
            record.smiles.push(found);
        }

        record.faces = faces;
        record.small = Some(small);
        Ok(record)
    }
}
