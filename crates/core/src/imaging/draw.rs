use crate::shared::frame::Frame;

pub type Color = [u8; 3];

/// Overlay palette, cycled per detected face.
pub const PALETTE: [Color; 8] = [
    [255, 0, 0],
    [255, 128, 0],
    [255, 255, 0],
    [0, 255, 0],
    [0, 128, 255],
    [0, 255, 255],
    [0, 0, 255],
    [255, 0, 255],
];

fn set_pixel(frame: &mut Frame, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 || x >= frame.width() as i32 || y >= frame.height() as i32 {
        return;
    }
    let w = frame.width() as usize;
    let offset = (y as usize * w + x as usize) * 3;
    frame.data_mut()[offset..offset + 3].copy_from_slice(&color);
}

/// Fill the axis-aligned rectangle spanned by two corner points
/// (inclusive), clamped to the frame.
pub fn fill_rect(frame: &mut Frame, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    debug_assert_eq!(frame.channels(), 3, "overlays are drawn on RGB frames");
    let (lo_x, hi_x) = (x0.min(x1), x0.max(x1));
    let (lo_y, hi_y) = (y0.min(y1), y0.max(y1));
    for y in lo_y..=hi_y {
        for x in lo_x..=hi_x {
            set_pixel(frame, x, y, color);
        }
    }
}

/// Rectangle outline between two corner points, `thickness` pixels wide,
/// centered on the ideal edge.
pub fn draw_rect_outline(
    frame: &mut Frame,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
    thickness: i32,
) {
    debug_assert_eq!(frame.channels(), 3, "overlays are drawn on RGB frames");
    let (lo_x, hi_x) = (x0.min(x1), x0.max(x1));
    let (lo_y, hi_y) = (y0.min(y1), y0.max(y1));
    let half = thickness / 2;
    let reach = thickness - 1 - half;

    fill_rect(frame, lo_x - half, lo_y - half, hi_x + reach, lo_y + reach, color);
    fill_rect(frame, lo_x - half, hi_y - half, hi_x + reach, hi_y + reach, color);
    fill_rect(frame, lo_x - half, lo_y - half, lo_x + reach, hi_y + reach, color);
    fill_rect(frame, hi_x - half, lo_y - half, hi_x + reach, hi_y + reach, color);
}

/// Circle outline of the given radius, `thickness` pixels wide.
pub fn draw_circle(
    frame: &mut Frame,
    cx: i32,
    cy: i32,
    radius: i32,
    color: Color,
    thickness: i32,
) {
    debug_assert_eq!(frame.channels(), 3, "overlays are drawn on RGB frames");
    if radius <= 0 {
        return;
    }
    let band = thickness as f64 / 2.0;
    let reach = radius + thickness;
    for y in (cy - reach)..=(cy + reach) {
        for x in (cx - reach)..=(cx + reach) {
            let dx = (x - cx) as f64;
            let dy = (y - cy) as f64;
            let dist = (dx * dx + dy * dy).sqrt();
            if (dist - radius as f64).abs() <= band {
                set_pixel(frame, x, y, color);
            }
        }
    }
}
