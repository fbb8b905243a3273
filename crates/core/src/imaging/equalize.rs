use crate::shared::frame::Frame;

/// Histogram equalization of a grayscale frame, in place.
///
/// Standard CDF remap: the darkest occupied bin maps to 0, the brightest
/// to 255. Constant images are left unchanged.
pub fn equalize_in_place(frame: &mut Frame) {
    debug_assert!(frame.is_grayscale(), "equalization expects grayscale input");

    let data = frame.data_mut();
    let total = data.len();
    if total == 0 {
        return;
    }

    let mut histogram = [0usize; 256];
    for &v in data.iter() {
        histogram[v as usize] += 1;
    }

    let mut cdf = [0usize; 256];
    let mut running = 0usize;
    for (bin, &count) in histogram.iter().enumerate() {
        running += count;
        cdf[bin] = running;
    }

    let cdf_min = cdf
        .iter()
        .copied()
        .find(|&c| c > 0)
        .unwrap_or(0);
    if cdf_min == total {
        // Single occupied bin: nothing to spread.
        return;
    }

    let scale = 255.0 / (total - cdf_min) as f64;
    let mut lut = [0u8; 256];
    for (bin, entry) in lut.iter_mut().enumerate() {
        let shifted = cdf[bin].saturating_sub(cdf_min);
        *entry = (shifted as f64 * scale).round() as u8;
    }

    for v in data.iter_mut() {
        *v = lut[*v as usize];
    }
}
