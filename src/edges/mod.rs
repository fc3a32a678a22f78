//! Crease detection: luma, Sobel magnitude, adaptive threshold, cleanup.

mod cleanup;
mod gradient;
mod threshold;
pub mod types;

pub use cleanup::remove_isolated_edges;
pub use gradient::{gradient_magnitude, grayscale};
pub use threshold::{adaptive_threshold, binarize};
pub use types::{EdgeClass, EdgeConfig, EdgeMask};

use crate::frame::Frame;

/// Stateless edge detector carrying its tunables.
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    config: EdgeConfig,
}

impl EdgeDetector {
    pub fn new(config: EdgeConfig) -> Self {
        Self { config }
    }

    /// Produce the binary crease map of `frame`.
    ///
    /// Deterministic; the frame is only read.
    pub fn detect(&self, frame: &Frame) -> EdgeMask {
        let _span = tracing::debug_span!("detect_edges").entered();

        let gray = grayscale(frame);
        let gradient = gradient_magnitude(&gray);
        let threshold = adaptive_threshold(&gradient, &self.config);
        let raw = binarize(&gradient, threshold);
        let cleaned = remove_isolated_edges(&raw, self.config.min_neighbors);

        tracing::debug!(
            "Edge threshold {:.1}: {} raw edge pixels, {} after cleanup",
            threshold,
            raw.edge_count(),
            cleaned.edge_count()
        );

        cleaned
    }
}

/// Detect edges with the default tunables.
pub fn detect_edges(frame: &Frame) -> EdgeMask {
    EdgeDetector::default().detect(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn black_frame_is_all_background() {
        let frame = Frame::from_fn(16, 12, |_, _| Rgba([0, 0, 0, 255])).unwrap();
        let mask = detect_edges(&frame);
        assert_eq!(mask.dimensions(), (16, 12));
        assert_eq!(mask.edge_count(), 0);
        assert!(mask
            .to_rgba_image()
            .pixels()
            .all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn vertical_step_marks_boundary_columns() {
        let frame = Frame::from_fn(8, 6, |x, _| {
            if x < 4 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
        .unwrap();
        let mask = detect_edges(&frame);

        for y in 0..6 {
            for x in 0..8 {
                let expected = (1..5).contains(&y) && (x == 3 || x == 4);
                assert_eq!(mask.get(x, y).is_edge(), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn custom_config_is_used() {
        let frame = Frame::from_fn(8, 8, |x, _| {
            if x < 4 {
                Rgba([40, 40, 40, 255])
            } else {
                Rgba([60, 60, 60, 255])
            }
        })
        .unwrap();

        // step of 20 -> magnitude 80 on the two boundary columns
        assert_eq!(detect_edges(&frame).edge_count(), 12);

        let strict = EdgeDetector::new(EdgeConfig {
            floor: 100.0,
            ..EdgeConfig::default()
        });
        assert_eq!(strict.detect(&frame).edge_count(), 0);
    }
}
