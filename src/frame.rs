use crate::error::FrameError;
use image::{GrayImage, Rgba, RgbaImage};

/// An immutable RGBA input frame with non-zero dimensions.
#[derive(Debug, Clone)]
pub struct Frame {
    image: RgbaImage,
}

impl Frame {
    /// Build a frame from a raw RGBA buffer (row-major, 4 bytes per pixel).
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, FrameError> {
        check_area(width, height)?;

        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(FrameError::BufferLength {
                expected,
                actual: pixels.len(),
            });
        }

        let image = RgbaImage::from_raw(width, height, pixels).ok_or(FrameError::BufferLength {
            expected,
            actual: 0,
        })?;

        Ok(Self { image })
    }

    pub fn from_image(image: RgbaImage) -> Result<Self, FrameError> {
        let (width, height) = image.dimensions();
        check_area(width, height)?;
        Ok(Self { image })
    }

    /// Build a frame by evaluating `f` at every pixel.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Result<Self, FrameError>
    where
        F: FnMut(u32, u32) -> Rgba<u8>,
    {
        check_area(width, height)?;
        Ok(Self {
            image: RgbaImage::from_fn(width, height, f),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA samples in row-major order.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }
}

fn check_area(width: u32, height: u32) -> Result<(), FrameError> {
    if width == 0 || height == 0 {
        return Err(FrameError::ZeroArea { width, height });
    }
    Ok(())
}

/// Broadcast luma (BT.601 weights), unrounded.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Single-channel buffer of a frame's dimensions, filled with `value`.
pub(crate) fn gray_filled(width: u32, height: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(width, height, image::Luma([value]))
}

/// Row-major index of `(x, y)` in a buffer of width `width`.
#[inline]
pub(crate) fn index(x: u32, y: u32, width: u32) -> usize {
    y as usize * width as usize + x as usize
}
