pub mod cluster;
pub mod model_resolver;
pub mod onnx_region_detector;
