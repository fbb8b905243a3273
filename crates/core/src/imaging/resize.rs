use crate::shared::frame::Frame;

/// Bilinear downscale by `factor` (>= 1). A factor of exactly 1 yields a
/// pixel-identical copy.
///
/// Output dimensions are `round(dim / factor)`, clamped to at least 1.
pub fn downscale(frame: &Frame, factor: f64) -> Frame {
    let src_w = frame.width() as usize;
    let src_h = frame.height() as usize;
    let channels = frame.channels() as usize;

    let out_w = ((src_w as f64 / factor).round() as usize).max(1);
    let out_h = ((src_h as f64 / factor).round() as usize).max(1);

    if out_w == src_w && out_h == src_h {
        return frame.clone();
    }

    // Center-aligned sampling: output pixel centers map onto source pixel
    // centers, so edges are not over-weighted.
    let x_ratio = src_w as f64 / out_w as f64;
    let y_ratio = src_h as f64 / out_h as f64;

    let src = frame.data();
    let mut out = vec![0u8; out_w * out_h * channels];

    for oy in 0..out_h {
        let sy = ((oy as f64 + 0.5) * y_ratio - 0.5).clamp(0.0, (src_h - 1) as f64);
        let y0 = sy.floor() as usize;
        let y1 = (y0 + 1).min(src_h - 1);
        let fy = sy - y0 as f64;

        for ox in 0..out_w {
            let sx = ((ox as f64 + 0.5) * x_ratio - 0.5).clamp(0.0, (src_w - 1) as f64);
            let x0 = sx.floor() as usize;
            let x1 = (x0 + 1).min(src_w - 1);
            let fx = sx - x0 as f64;

            for c in 0..channels {
                let p00 = src[(y0 * src_w + x0) * channels + c] as f64;
                let p01 = src[(y0 * src_w + x1) * channels + c] as f64;
                let p10 = src[(y1 * src_w + x0) * channels + c] as f64;
                let p11 = src[(y1 * src_w + x1) * channels + c] as f64;

                let top = p00 + (p01 - p00) * fx;
                let bottom = p10 + (p11 - p10) * fx;
                let value = top + (bottom - top) * fy;
                out[(oy * out_w + ox) * channels + c] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Frame::new(
        out,
        out_w as u32,
        out_h as u32,
        frame.channels(),
        frame.index(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_factor_is_identity() {
        let data: Vec<u8> = (0..36).collect();
        let frame = Frame::new(data.clone(), 6, 6, 1, 0);
        let out = downscale(&frame, 1.0);
        assert_eq!(out.data(), &data[..]);
        assert_eq!(out.width(), 6);
        assert_eq!(out.height(), 6);
    }

    #[test]
    fn test_half_scale_dimensions() {
        let frame = Frame::new(vec![0u8; 100], 10, 10, 1, 3);
        let out = downscale(&frame, 2.0);
        assert_eq!(out.width(), 5);
        assert_eq!(out.height(), 5);
        assert_eq!(out.index(), 3);
    }

    #[test]
    fn test_half_scale_averages_blocks() {
        // 4x4 checkerboard of 0/200: every 2x2 block averages to 100.
        let mut data = vec![0u8; 16];
        for y in 0..4 {
            for x in 0..4 {
                data[y * 4 + x] = if (x + y) % 2 == 0 { 0 } else { 200 };
            }
        }
        let frame = Frame::new(data, 4, 4, 1, 0);
        let out = downscale(&frame, 2.0);
        assert_eq!(out.width(), 2);
        assert!(out.data().iter().all(|&v| v == 100));
    }

    #[test]
    fn test_constant_image_stays_constant() {
        let frame = Frame::new(vec![73u8; 9 * 7], 9, 7, 1, 0);
        let out = downscale(&frame, 1.5);
        assert!(out.data().iter().all(|&v| v == 73));
    }

    #[test]
    fn test_never_collapses_below_one_pixel() {
        let frame = Frame::new(vec![5u8; 4], 2, 2, 1, 0);
        let out = downscale(&frame, 100.0);
        assert_eq!(out.width(), 1);
        assert_eq!(out.height(), 1);
    }

    #[test]
    fn test_rgb_channels_resized_independently() {
        let mut data = vec![0u8; 4 * 4 * 3];
        for px in data.chunks_exact_mut(3) {
            px[0] = 200;
            px[2] = 40;
        }
        let frame = Frame::new(data, 4, 4, 3, 0);
        let out = downscale(&frame, 2.0);
        for px in out.data().chunks_exact(3) {
            assert_eq!(px, [200, 0, 40]);
        }
    }
}
