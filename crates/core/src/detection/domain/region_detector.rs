use crate::shared::constants::{
    DETECT_SCALE_STEP, FACE_MIN_NEIGHBORS, MIN_FEATURE_SIZE, SMILE_MIN_NEIGHBORS,
};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Detection policy passed alongside the image.
#[derive(Clone, Copy, Debug)]
pub struct DetectParams {
    /// Scale step of a multi-scale scan. Single-shot backends that scan
    /// scale internally may ignore it.
    pub scale_step: f64,
    /// Minimum number of raw candidates that must agree on a region.
    /// Zero returns raw candidates ungrouped.
    pub min_neighbors: usize,
    /// Candidates smaller than this (either dimension) are discarded.
    pub min_size: (u32, u32),
}

impl DetectParams {
    /// Primary (face) policy: 1.1 scale step, 2 neighbors, 30x30 minimum.
    pub fn faces() -> Self {
        Self {
            scale_step: DETECT_SCALE_STEP,
            min_neighbors: FACE_MIN_NEIGHBORS,
            min_size: (MIN_FEATURE_SIZE, MIN_FEATURE_SIZE),
        }
    }

    /// Secondary (smile) policy: ungrouped candidates, 30x30 minimum.
    pub fn smiles() -> Self {
        Self {
            scale_step: DETECT_SCALE_STEP,
            min_neighbors: SMILE_MIN_NEIGHBORS,
            min_size: (MIN_FEATURE_SIZE, MIN_FEATURE_SIZE),
        }
    }
}

/// Domain interface for region detection.
///
/// Implementations are stateful (`&mut self`) and not safe for concurrent
/// use: the pipeline guarantees that a given instance is only ever entered
/// by one call at a time.
pub trait RegionDetector: Send {
    fn detect(
        &mut self,
        image: &Frame,
        params: &DetectParams,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_face_policy() {
        let params = DetectParams::faces();
        assert_relative_eq!(params.scale_step, 1.1);
        assert_eq!(params.min_neighbors, 2);
        assert_eq!(params.min_size, (30, 30));
    }

    #[test]
    fn test_smile_policy_is_ungrouped() {
        let params = DetectParams::smiles();
        assert_eq!(params.min_neighbors, 0);
        assert_eq!(params.min_size, (30, 30));
    }
}
