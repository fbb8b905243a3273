use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Extract a sub-image, clamping the region to the frame bounds.
///
/// Returns `None` when the clamped intersection is empty.
pub fn crop(frame: &Frame, region: Region) -> Option<Frame> {
    let fw = frame.width() as i32;
    let fh = frame.height() as i32;

    let x0 = region.x.max(0);
    let y0 = region.y.max(0);
    let x1 = (region.x + region.width).min(fw);
    let y1 = (region.y + region.height).min(fh);

    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    let channels = frame.channels() as usize;
    let src = frame.data();
    let out_w = (x1 - x0) as usize;
    let out_h = (y1 - y0) as usize;

    let mut out = Vec::with_capacity(out_w * out_h * channels);
    for row in y0..y1 {
        let offset = (row as usize * frame.width() as usize + x0 as usize) * channels;
        out.extend_from_slice(&src[offset..offset + out_w * channels]);
    }

    Some(Frame::new(
        out,
        out_w as u32,
        out_h as u32,
        frame.channels(),
        frame.index(),
    ))
}
