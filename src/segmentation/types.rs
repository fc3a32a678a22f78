use image::{GrayImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// Hand landmark in normalized frame coordinates (both axes nominally 0..1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuidePoint {
    pub x: f64,
    pub y: f64,
}

impl GuidePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp into the unit square and scale to pixel coordinates.
    ///
    /// Returns `None` for non-finite coordinates.
    pub fn to_pixel(self, width: u32, height: u32) -> Option<Point> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return None;
        }
        Some(Point::new(
            self.x.clamp(0.0, 1.0) * width as f64,
            self.y.clamp(0.0, 1.0) * height as f64,
        ))
    }
}

/// Point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Region coverage mask: white everywhere, membership carried by alpha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    alpha: GrayImage,
}

impl AlphaMask {
    pub(crate) fn from_gray(alpha: GrayImage) -> Self {
        Self { alpha }
    }

    pub fn width(&self) -> u32 {
        self.alpha.width()
    }

    pub fn height(&self) -> u32 {
        self.alpha.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.alpha.dimensions()
    }

    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.alpha.get_pixel(x, y)[0]
    }

    /// Alpha channel as a single-channel image.
    pub fn as_gray(&self) -> &GrayImage {
        &self.alpha
    }

    /// Number of pixels with non-zero alpha.
    pub fn covered_count(&self) -> usize {
        self.alpha.as_raw().iter().filter(|&&a| a > 0).count()
    }

    /// Opaque grayscale visualization of the alpha channel.
    pub fn to_matte_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let a = self.alpha(x, y);
            Rgba([a, a, a, 255])
        })
    }

    /// Render as RGBA: constant white, alpha carries the mask.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            Rgba([255, 255, 255, self.alpha(x, y)])
        })
    }
}

/// Tunables for region segmentation.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentConfig {
    /// Minimum hull outline width in pixels.
    pub stroke_min_width: f64,
    /// Outline width as a fraction of the shorter frame side.
    pub stroke_fraction: f64,
    /// Gaussian sigma applied to the rasterized hull. 0 disables the blur.
    pub blur_sigma: f32,
    /// Open interval accepted for `R - Y`.
    pub cr_range: (f64, f64),
    /// Open interval accepted for `B - Y`.
    pub cb_range: (f64, f64),
    /// Luma must exceed this for a pixel to count as skin.
    pub min_luma: f64,
}

impl SegmentConfig {
    /// Outline width for a frame of the given size.
    pub fn stroke_width(&self, width: u32, height: u32) -> f64 {
        let short_side = width.min(height) as f64;
        self.stroke_min_width.max(short_side * self.stroke_fraction)
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            stroke_min_width: 24.0,
            stroke_fraction: 0.06,
            blur_sigma: 28.0,
            cr_range: (8.0, 70.0),
            cb_range: (-25.0, 25.0),
            min_luma: 30.0,
        }
    }
}
