/// Running min/max of smile-candidate counts, used to normalize a display
/// intensity into [0, 1].
///
/// Candidate counts depend on image size, illumination, and the face
/// itself, so absolute values mean little; the floating window adapts to
/// whatever range this run actually produces. Estimates are only
/// meaningful after the first real smile has been observed. Owned by the
/// annotate stage — never process-global — so independent pipelines stay
/// independent.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmileIntensity {
    bounds: Option<(usize, usize)>,
}

impl SmileIntensity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one observation into the window and return the normalized
    /// intensity for it.
    pub fn observe(&mut self, count: usize) -> f64 {
        let (min, max) = match self.bounds {
            Some((min, max)) => (min.min(count), max.max(count)),
            None => (count, count),
        };
        self.bounds = Some((min, max));
        self.intensity(count)
    }

    /// `(count − min) / (max − min + 1)`; 0 before any observation.
    pub fn intensity(&self, count: usize) -> f64 {
        match self.bounds {
            Some((min, max)) => {
                (count as f64 - min as f64) / (max as f64 - min as f64 + 1.0)
            }
            None => 0.0,
        }
    }

    pub fn bounds(&self) -> Option<(usize, usize)> {
        self.bounds
    }
}
