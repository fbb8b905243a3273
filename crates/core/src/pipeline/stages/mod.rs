pub mod downscale_stage;
pub mod equalize_stage;
pub mod face_detect_stage;
pub mod grayscale_stage;
pub mod smile_annotate_stage;
