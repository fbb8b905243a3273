use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// The full working state for one frame moving through the stage pipeline.
///
/// A record is owned by exactly one stage (or the hand-off queue, or the
/// display consumer) at any instant; ownership transfers by value, so no
/// concurrent mutation is possible.
#[derive(Debug)]
pub struct FrameRecord {
    /// Original RGB frame; overlays are drawn into it.
    pub frame: Frame,
    /// Grayscale derivative, produced by the grayscale stage.
    pub gray: Option<Frame>,
    /// Downscaled (and later equalized) grayscale, produced by the
    /// downscale stage; detection runs on this image.
    pub small: Option<Frame>,
    /// Primary (face) regions, in downscaled-image coordinates.
    pub faces: Vec<Region>,
    /// Primary regions from the mirrored pass, already reprojected into
    /// original orientation.
    pub mirrored_faces: Vec<Region>,
    /// Secondary (smile) detections, one list per entry in `faces`.
    pub smiles: Vec<Vec<Region>>,
}

impl FrameRecord {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            gray: None,
            small: None,
            faces: Vec::new(),
            mirrored_faces: Vec::new(),
            smiles: Vec::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.frame.index()
    }
}
