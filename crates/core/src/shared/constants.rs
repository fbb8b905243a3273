/// Hand-off queue capacity between the pipeline and the display consumer.
///
/// Deliberately small: caps memory and keeps the pipeline from running far
/// ahead of rendering.
pub const HANDOFF_CAPACITY: usize = 2;

/// Scale step between detection passes of a multi-scale scanner.
pub const DETECT_SCALE_STEP: f64 = 1.1;

/// Minimum candidate-cluster size for a face detection to be kept.
pub const FACE_MIN_NEIGHBORS: usize = 2;

/// Smile candidates are kept ungrouped (raw neighbor count feeds the
/// intensity estimate).
pub const SMILE_MIN_NEIGHBORS: usize = 0;

/// Smallest detectable feature, in pixels, for both classifiers.
pub const MIN_FEATURE_SIZE: u32 = 30;

/// Aspect-ratio band (exclusive) inside which a face gets a circle overlay.
pub const NEAR_SQUARE_MIN_ASPECT: f64 = 0.75;
pub const NEAR_SQUARE_MAX_ASPECT: f64 = 1.3;

pub const FACE_MODEL_NAME: &str = "blazeface_short_range.onnx";
pub const FACE_MODEL_URL: &str =
    "https://github.com/smilescope/smilescope/releases/download/v0.1.0/blazeface_short_range.onnx";

pub const SMILE_MODEL_NAME: &str = "smile_range_128.onnx";
pub const SMILE_MODEL_URL: &str =
    "https://github.com/smilescope/smilescope/releases/download/v0.1.0/smile_range_128.onnx";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
