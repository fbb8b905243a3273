use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum ImageSequenceError {
    #[error("failed to read input directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no image files found in {0}")]
    NoImages(PathBuf),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Adapts a directory of image files (or a single image file) to the
/// [`FrameSource`] interface.
///
/// Directory entries are ordered by file name, which is the frame order;
/// each file becomes one RGB frame with a sequential index. Decoding uses
/// the `image` crate.
pub struct ImageSequenceSource {
    paths: std::vec::IntoIter<PathBuf>,
    next_index: usize,
}

impl ImageSequenceSource {
    /// Listing or an empty input fails here, before the pipeline starts.
    pub fn open(input: &Path) -> Result<Self, ImageSequenceError> {
        let mut paths = if input.is_dir() {
            let entries = std::fs::read_dir(input).map_err(|e| ImageSequenceError::ReadDir {
                path: input.to_path_buf(),
                source: e,
            })?;
            entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| has_image_extension(p))
                .collect::<Vec<_>>()
        } else if has_image_extension(input) {
            vec![input.to_path_buf()]
        } else {
            Vec::new()
        };

        if paths.is_empty() {
            return Err(ImageSequenceError::NoImages(input.to_path_buf()));
        }
        paths.sort();

        Ok(Self {
            paths: paths.into_iter(),
            next_index: 0,
        })
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            let lower = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&lower.as_str())
        })
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let Some(path) = self.paths.next() else {
            return Ok(None);
        };

        let img = image::open(&path)
            .map_err(|e| ImageSequenceError::Decode {
                path: path.clone(),
                source: e,
            })?
            .to_rgb8();

        let (width, height) = img.dimensions();
        let frame = Frame::new(img.into_raw(), width, height, 3, self.next_index);
        self.next_index += 1;
        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_image(dir: &Path, name: &str, shade: u8) {
        let mut img = image::RgbImage::new(8, 6);
        for px in img.pixels_mut() {
            *px = image::Rgb([shade, shade, shade]);
        }
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_frames_come_back_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "b.png", 20);
        write_image(dir.path(), "a.png", 10);
        write_image(dir.path(), "c.png", 30);

        let mut source = ImageSequenceSource::open(dir.path()).unwrap();
        let shades: Vec<u8> = std::iter::from_fn(|| source.next_frame().unwrap())
            .map(|f| f.data()[0])
            .collect();
        assert_eq!(shades, vec![10, 20, 30]);
    }

    #[test]
    fn test_indices_are_sequential() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "0.png", 0);
        write_image(dir.path(), "1.png", 0);

        let mut source = ImageSequenceSource::open(dir.path()).unwrap();
        assert_eq!(source.next_frame().unwrap().unwrap().index(), 0);
        assert_eq!(source.next_frame().unwrap().unwrap().index(), 1);
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_exhaustion_is_sticky() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "only.png", 0);

        let mut source = ImageSequenceSource::open(dir.path()).unwrap();
        source.next_frame().unwrap();
        assert!(source.next_frame().unwrap().is_none());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_single_image_file_input() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "frame.png", 99);

        let mut source = ImageSequenceSource::open(&dir.path().join("frame.png")).unwrap();
        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!(frame.width(), 8);
        assert_eq!(frame.height(), 6);
        assert_eq!(frame.data()[0], 99);
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_non_image_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "frame.png", 1);
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let mut source = ImageSequenceSource::open(dir.path()).unwrap();
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_empty_directory_fails_at_open() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ImageSequenceSource::open(dir.path()),
            Err(ImageSequenceError::NoImages(_))
        ));
    }

    #[test]
    fn test_corrupt_file_fails_the_read_not_the_open() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.png"), b"not a png").unwrap();

        let mut source = ImageSequenceSource::open(dir.path()).unwrap();
        assert!(source.next_frame().is_err());
    }
}
