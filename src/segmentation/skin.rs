use super::types::{AlphaMask, SegmentConfig};
use crate::frame::{luma, Frame};
use image::{GrayImage, Luma};

/// Per-pixel skin test on unnormalized chroma offsets.
///
/// `Cr = R - Y` and `Cb = B - Y` must both fall strictly inside their
/// configured intervals, and `Y` must exceed `min_luma`.
pub fn is_skin(r: u8, g: u8, b: u8, config: &SegmentConfig) -> bool {
    let y = luma(r, g, b);
    let cr = r as f64 - y;
    let cb = b as f64 - y;

    cr > config.cr_range.0
        && cr < config.cr_range.1
        && cb > config.cb_range.0
        && cb < config.cb_range.1
        && y > config.min_luma
}

/// Hard-edged skin mask: alpha 255 on skin pixels, 0 elsewhere.
pub fn skin_mask(frame: &Frame, config: &SegmentConfig) -> AlphaMask {
    let (width, height) = frame.dimensions();
    let src = frame.image();
    let alpha = GrayImage::from_fn(width, height, |x, y| {
        let px = src.get_pixel(x, y);
        Luma([if is_skin(px[0], px[1], px[2], config) { 255 } else { 0 }])
    });
    AlphaMask::from_gray(alpha)
}
