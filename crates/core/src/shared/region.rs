use crate::shared::constants::{NEAR_SQUARE_MAX_ASPECT, NEAR_SQUARE_MIN_ASPECT};

/// A detected rectangular region in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Whether this region is close enough to square for a circle overlay.
    ///
    /// Bounds are strict: a ratio exactly on a boundary gets the rectangle
    /// overlay.
    pub fn is_near_square(&self) -> bool {
        let ratio = self.aspect_ratio();
        NEAR_SQUARE_MIN_ASPECT < ratio && ratio < NEAR_SQUARE_MAX_ASPECT
    }

    /// Reproject a region detected on a horizontally flipped image back
    /// into original-orientation coordinates.
    ///
    /// `image_width` is the width of the image the detection ran on (the
    /// downscaled image, not the original frame).
    pub fn mirrored(&self, image_width: u32) -> Self {
        Self {
            x: image_width as i32 - self.x - self.width,
            ..*self
        }
    }

    /// The lower half of this region, where the secondary (smile) search
    /// is restricted.
    pub fn lower_half(&self) -> Self {
        let half = (self.height as f64 / 2.0).round() as i32;
        Self {
            x: self.x,
            y: self.y + half,
            width: self.width,
            height: half - 1,
        }
    }
}
