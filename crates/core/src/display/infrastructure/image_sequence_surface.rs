use std::path::{Path, PathBuf};

use crate::display::domain::display_surface::DisplaySurface;
use crate::shared::frame::Frame;

/// Headless display: writes each presented frame as a numbered PNG.
///
/// Keyboard input never arrives here, so a run ends only when the input
/// is exhausted.
pub struct ImageSequenceSurface {
    dir: PathBuf,
    written: usize,
}

impl ImageSequenceSurface {
    pub fn new(dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            written: 0,
        })
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl DisplaySurface for ImageSequenceSurface {
    fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if frame.channels() != 3 {
            return Err(format!("expected RGB frame, got {} channels", frame.channels()).into());
        }
        let image = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("frame buffer size does not match dimensions")?;
        let path = self.dir.join(format!("{:06}.png", frame.index()));
        image.save(&path)?;
        self.written += 1;
        Ok(())
    }

    fn poll_key(&mut self) -> Option<char> {
        None
    }
}
