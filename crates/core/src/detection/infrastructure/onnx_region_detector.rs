/// Anchor-based region detector using ONNX Runtime via `ort`.
///
/// Runs a BlazeFace-style single-shot model: 896 anchors over a 128x128
/// input, one box regression and one confidence score per anchor. The
/// min-neighbors policy is applied on top as IoU clustering of the raw
/// candidates — a region survives only if enough anchors agreed on it.
///
/// Not reentrant: the session is entered from exactly one pipeline stage
/// at a time.
use std::path::Path;

use crate::detection::domain::region_detector::{DetectParams, RegionDetector};
use crate::detection::infrastructure::cluster::{cluster_boxes, mean_box, RawBox};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Model input resolution.
const INPUT_SIZE: u32 = 128;

/// Default confidence threshold.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// IoU above which two raw candidates count as neighbors.
const NEIGHBOR_IOU_THRESH: f64 = 0.4;

/// Number of anchors (short-range model).
const NUM_ANCHORS: usize = 896;

pub struct OnnxRegionDetector {
    session: ort::session::Session,
    confidence: f64,
    anchors: Vec<[f32; 2]>,
}

impl OnnxRegionDetector {
    /// Load a model file into an ONNX Runtime session.
    pub fn new(model_path: &Path, confidence: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;
        Ok(Self {
            session,
            confidence,
            anchors: generate_anchors(),
        })
    }
}

impl RegionDetector for OnnxRegionDetector {
    fn detect(
        &mut self,
        image: &Frame,
        params: &DetectParams,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let fw = image.width();
        let fh = image.height();
        if fw == 0 || fh == 0 {
            return Ok(Vec::new());
        }

        let input_tensor = preprocess(image, INPUT_SIZE);
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;

        // Two output tensors: box regressors [1, 896, 16] and confidence
        // scores [1, 896, 1].
        if outputs.len() < 2 {
            return Err(format!("model expected 2 outputs, got {}", outputs.len()).into());
        }

        let regressors = outputs[0].try_extract_array::<f32>()?;
        let scores = outputs[1].try_extract_array::<f32>()?;
        let reg_data = regressors.as_slice().ok_or("Cannot get regressor slice")?;
        let score_data = scores.as_slice().ok_or("Cannot get score slice")?;

        let mut candidates = Vec::new();
        let num_anchors = self.anchors.len().min(NUM_ANCHORS);

        for (i, &raw_score) in score_data.iter().enumerate().take(num_anchors) {
            let score = sigmoid(raw_score);
            if score < self.confidence as f32 {
                continue;
            }

            let anchor = &self.anchors[i];
            let reg_offset = i * 16;
            if reg_offset + 4 > reg_data.len() {
                break;
            }

            // Box center and size are regressed relative to the anchor.
            let cx = anchor[0] + reg_data[reg_offset] / INPUT_SIZE as f32;
            let cy = anchor[1] + reg_data[reg_offset + 1] / INPUT_SIZE as f32;
            let w = reg_data[reg_offset + 2] / INPUT_SIZE as f32;
            let h = reg_data[reg_offset + 3] / INPUT_SIZE as f32;

            let x1 = ((cx - w / 2.0) * fw as f32).max(0.0);
            let y1 = ((cy - h / 2.0) * fh as f32).max(0.0);
            let x2 = ((cx + w / 2.0) * fw as f32).min(fw as f32);
            let y2 = ((cy + h / 2.0) * fh as f32).min(fh as f32);

            candidates.push(RawBox {
                x1: x1 as f64,
                y1: y1 as f64,
                x2: x2 as f64,
                y2: y2 as f64,
                score: score as f64,
            });
        }

        Ok(postprocess(&candidates, params, fw, fh))
    }
}

/// Apply the min-neighbors and min-size policies to raw candidates.
///
/// `min_neighbors > 0`: cluster by IoU, keep clusters with at least that
/// many members, emit each cluster's mean box. `min_neighbors == 0`: raw
/// candidates pass through ungrouped (their count is meaningful to the
/// caller).
fn postprocess(candidates: &[RawBox], params: &DetectParams, fw: u32, fh: u32) -> Vec<Region> {
    let boxes: Vec<RawBox> = if params.min_neighbors == 0 {
        candidates.to_vec()
    } else {
        cluster_boxes(candidates, NEIGHBOR_IOU_THRESH)
            .into_iter()
            .filter(|cluster| cluster.len() >= params.min_neighbors)
            .map(|cluster| mean_box(&cluster))
            .collect()
    };

    boxes
        .iter()
        .filter_map(|b| to_region(b, fw, fh))
        .filter(|r| r.width >= params.min_size.0 as i32 && r.height >= params.min_size.1 as i32)
        .collect()
}

fn to_region(b: &RawBox, fw: u32, fh: u32) -> Option<Region> {
    let x = b.x1.round() as i32;
    let y = b.y1.round() as i32;
    let w = ((b.x2 - b.x1).round() as i32).min(fw as i32 - x);
    let h = ((b.y2 - b.y1).round() as i32).min(fh as i32 - y);
    if w <= 0 || h <= 0 {
        return None;
    }
    Some(Region::new(x, y, w, h))
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Resize to `size x size`, normalize to [0,1], NCHW float32. Grayscale
/// input is replicated across the three model channels.
fn preprocess(image: &Frame, size: u32) -> ndarray::Array4<f32> {
    let src = image.as_ndarray();
    let src_h = image.height() as usize;
    let src_w = image.width() as usize;
    let channels = image.channels() as usize;
    let s = size as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));

    for y in 0..s {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / s as f64) as usize).min(src_h - 1);
        for x in 0..s {
            let src_x = (((x as f64 + 0.5) * src_w as f64 / s as f64) as usize).min(src_w - 1);
            for c in 0..3 {
                let src_c = if channels == 1 { 0 } else { c };
                tensor[[0, c, y, x]] = src[[src_y, src_x, src_c]] as f32 / 255.0;
            }
        }
    }

    tensor
}

// ---------------------------------------------------------------------------
// Anchor generation (short-range grid)
// ---------------------------------------------------------------------------

/// Two feature-map resolutions: 16x16 cells with 2 anchors and 8x8 cells
/// with 6 anchors, 896 total.
fn generate_anchors() -> Vec<[f32; 2]> {
    let strides = [(8, 2), (16, 6)]; // (stride, anchors_per_cell)
    let mut anchors = Vec::with_capacity(NUM_ANCHORS);

    for &(stride, num) in &strides {
        let grid_size = INPUT_SIZE as usize / stride;
        for y in 0..grid_size {
            for x in 0..grid_size {
                let cx = (x as f32 + 0.5) / grid_size as f32;
                let cy = (y as f32 + 0.5) / grid_size as f32;
                for _ in 0..num {
                    anchors.push([cx, cy]);
                }
            }
        }
    }

    anchors
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
