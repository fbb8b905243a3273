use crate::shared::frame::Frame;

/// Rec.601 luma reduction of an RGB frame to a single-channel frame.
///
/// Already-grayscale input is passed through unchanged.
pub fn to_grayscale(frame: &Frame) -> Frame {
    if frame.is_grayscale() {
        return frame.clone();
    }

    let data = frame.data();
    let mut out = Vec::with_capacity((frame.width() * frame.height()) as usize);
    for px in data.chunks_exact(3) {
        let luma = 0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64;
        out.push(luma.round().clamp(0.0, 255.0) as u8);
    }
    Frame::new(out, frame.width(), frame.height(), 1, frame.index())
}
