pub mod region_detector;
pub mod smile_intensity;
