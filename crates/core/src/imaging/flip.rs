use crate::shared::frame::Frame;

/// Mirror a frame around its vertical axis.
pub fn flip_horizontal(frame: &Frame) -> Frame {
    let w = frame.width() as usize;
    let h = frame.height() as usize;
    let channels = frame.channels() as usize;
    let src = frame.data();

    let mut out = vec![0u8; src.len()];
    for y in 0..h {
        for x in 0..w {
            let src_off = (y * w + x) * channels;
            let dst_off = (y * w + (w - 1 - x)) * channels;
            out[dst_off..dst_off + channels].copy_from_slice(&src[src_off..src_off + channels]);
        }
    }

    Frame::new(
        out,
        frame.width(),
        frame.height(),
        frame.channels(),
        frame.index(),
    )
}
