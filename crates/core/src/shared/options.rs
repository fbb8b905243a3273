/// Validated pipeline configuration.
///
/// Built once at startup from already-parsed CLI input; stages receive it
/// read-only.
#[derive(Clone, Copy, Debug)]
pub struct PipelineOptions {
    downscale_factor: f64,
    mirror_detection: bool,
}

impl PipelineOptions {
    /// Factors below 1 are clamped to 1: detection never runs on an
    /// upscaled image.
    pub fn new(downscale_factor: f64, mirror_detection: bool) -> Self {
        let factor = if downscale_factor < 1.0 {
            log::warn!("downscale factor {downscale_factor} below 1, clamping to 1");
            1.0
        } else {
            downscale_factor
        };
        Self {
            downscale_factor: factor,
            mirror_detection,
        }
    }

    pub fn downscale_factor(&self) -> f64 {
        self.downscale_factor
    }

    pub fn mirror_detection(&self) -> bool {
        self.mirror_detection
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::new(1.0, false)
    }
}
