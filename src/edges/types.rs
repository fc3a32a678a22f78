use crate::error::FrameError;
use crate::frame::index;
use image::{Rgba, RgbaImage};

/// Classification of a single edge-map pixel.
///
/// When rendered, an edge becomes a dark pixel (channel value 0) and
/// background becomes white (255). Downstream compositing relies on
/// "dark means edge", which is the inverse of an alpha convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeClass {
    Edge,
    Background,
}

impl EdgeClass {
    /// Channel value used for this class in the rendered mask.
    pub fn channel(self) -> u8 {
        match self {
            EdgeClass::Edge => 0,
            EdgeClass::Background => 255,
        }
    }

    pub fn is_edge(self) -> bool {
        self == EdgeClass::Edge
    }
}

/// Binary crease map produced by the edge detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask {
    width: u32,
    height: u32,
    classes: Vec<EdgeClass>,
}

impl EdgeMask {
    /// Build a mask from row-major classes.
    pub fn from_classes(
        width: u32,
        height: u32,
        classes: Vec<EdgeClass>,
    ) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroArea { width, height });
        }
        let expected = width as usize * height as usize;
        if classes.len() != expected {
            return Err(FrameError::BufferLength {
                expected,
                actual: classes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            classes,
        })
    }

    /// Caller guarantees `classes.len() == width * height`.
    pub(crate) fn from_parts(width: u32, height: u32, classes: Vec<EdgeClass>) -> Self {
        debug_assert_eq!(classes.len(), width as usize * height as usize);
        Self {
            width,
            height,
            classes,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> EdgeClass {
        self.classes[index(x, y, self.width)]
    }

    pub fn classes(&self) -> &[EdgeClass] {
        &self.classes
    }

    pub fn edge_count(&self) -> usize {
        self.classes.iter().filter(|c| c.is_edge()).count()
    }

    /// Render as an opaque RGBA image: black creases on white.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let v = self.get(x, y).channel();
            Rgba([v, v, v, 255])
        })
    }
}

/// Tunables for the edge detector.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeConfig {
    /// Rank of the sorted gradient magnitudes used as the base threshold.
    pub percentile: f64,
    /// Base value used when the percentile sample is missing or zero.
    pub fallback: f64,
    /// Multiplier applied to the percentile sample.
    pub scale: f64,
    /// Lower bound of the final threshold.
    pub floor: f64,
    /// Edge pixels with fewer edge pixels than this in their 3x3
    /// neighbourhood (self included) are dropped.
    pub min_neighbors: usize,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            percentile: 0.55,
            fallback: 20.0,
            scale: 1.1,
            floor: 18.0,
            min_neighbors: 3,
        }
    }
}
