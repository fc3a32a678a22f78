use crate::frame::{luma, Frame};
use image::{GrayImage, Luma};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

/// Luma of every pixel, truncated toward zero.
pub fn grayscale(frame: &Frame) -> GrayImage {
    let (width, height) = frame.dimensions();
    let src = frame.image();
    GrayImage::from_fn(width, height, |x, y| {
        let px = src.get_pixel(x, y);
        Luma([luma(px[0], px[1], px[2]) as u8])
    })
}

/// 3x3 Sobel gradient magnitude, clamped to 255.
///
/// The one-pixel border has no full neighbourhood and stays at 0.
pub fn gradient_magnitude(gray: &GrayImage) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut out = GrayImage::new(width, height);
    if width < 3 || height < 3 {
        return out;
    }

    // imageproc clamps reads at the border; those pixels are discarded below
    let gx = horizontal_sobel(gray);
    let gy = vertical_sobel(gray);

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let sx = gx.get_pixel(x, y)[0] as f32;
            let sy = gy.get_pixel(x, y)[0] as f32;
            let magnitude = (sx * sx + sy * sy).sqrt().min(255.0);
            out.put_pixel(x, y, Luma([magnitude.round_ties_even() as u8]));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn grayscale_truncates() {
        // 0.299 * 100 = 29.9, 0.114 * 3 = 0.342
        let frame = Frame::from_raw(2, 1, vec![100, 0, 0, 255, 0, 0, 3, 255]).unwrap();
        let gray = grayscale(&frame);
        assert_eq!(gray.get_pixel(0, 0)[0], 29);
        assert_eq!(gray.get_pixel(1, 0)[0], 0);
    }

    #[test]
    fn flat_image_has_no_gradient() {
        let gray = GrayImage::from_pixel(6, 6, Luma([128]));
        let grad = gradient_magnitude(&gray);
        assert!(grad.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn vertical_step_saturates_boundary_columns() {
        let frame = Frame::from_fn(8, 6, |x, _| {
            if x < 4 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
        .unwrap();
        let grad = gradient_magnitude(&grayscale(&frame));

        for y in 1..5 {
            assert_eq!(grad.get_pixel(3, y)[0], 255);
            assert_eq!(grad.get_pixel(4, y)[0], 255);
            assert_eq!(grad.get_pixel(2, y)[0], 0);
            assert_eq!(grad.get_pixel(5, y)[0], 0);
        }
        // border untouched
        assert_eq!(grad.get_pixel(3, 0)[0], 0);
        assert_eq!(grad.get_pixel(4, 5)[0], 0);
    }

    #[test]
    fn diagonal_magnitude_rounds() {
        let mut gray = GrayImage::new(4, 4);
        gray.put_pixel(2, 2, Luma([1]));
        let grad = gradient_magnitude(&gray);
        // bottom-right tap: sqrt(1 + 1) = 1.414 -> 1
        assert_eq!(grad.get_pixel(1, 1)[0], 1);
        // directly left: sx = 2, sy = 0 -> 2
        assert_eq!(grad.get_pixel(1, 2)[0], 2);
    }

    #[test]
    fn border_ignores_clamped_neighbourhood() {
        // a bright first row gives non-zero clamped sums on row 0
        let gray = GrayImage::from_fn(5, 5, |_, y| if y == 0 { Luma([255]) } else { Luma([0]) });
        let grad = gradient_magnitude(&gray);
        for x in 0..5 {
            assert_eq!(grad.get_pixel(x, 0)[0], 0);
        }
        assert_eq!(grad.get_pixel(2, 1)[0], 255);
        assert_eq!(grad.get_pixel(2, 2)[0], 0);
    }

    #[test]
    fn tiny_frames_are_all_border() {
        let gray = GrayImage::from_pixel(2, 5, Luma([200]));
        let grad = gradient_magnitude(&gray);
        assert_eq!(grad.dimensions(), (2, 5));
        assert!(grad.pixels().all(|p| p[0] == 0));
    }
}
