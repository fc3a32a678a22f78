mod hull;
mod raster;
mod skin;
pub mod types;

pub use hull::convex_hull;
pub use raster::{fill_convex_polygon, stroke_polygon};
pub use skin::{is_skin, skin_mask};
pub use types::{AlphaMask, GuidePoint, Point, SegmentConfig};

use crate::frame::{gray_filled, Frame};
use image::imageops;

/// Builds the hand silhouette mask for one frame.
///
/// With guide points the mask is the padded, blurred convex hull of the
/// points; without them a per-pixel skin heuristic is used.
#[derive(Debug, Clone, Default)]
pub struct RegionSegmenter {
    config: SegmentConfig,
}

impl RegionSegmenter {
    pub fn new(config: SegmentConfig) -> Self {
        Self { config }
    }

    pub fn segment(&self, frame: &Frame, guides: &[GuidePoint]) -> AlphaMask {
        let _span = tracing::debug_span!("segment_region", guides = guides.len()).entered();

        if guides.is_empty() {
            tracing::debug!("No guide points, using skin heuristic");
            return skin_mask(frame, &self.config);
        }

        self.hull_mask(frame, guides)
    }

    fn hull_mask(&self, frame: &Frame, guides: &[GuidePoint]) -> AlphaMask {
        let (width, height) = frame.dimensions();

        let points: Vec<Point> = guides
            .iter()
            .filter_map(|g| g.to_pixel(width, height))
            .collect();
        let hull = convex_hull(&points);
        let line_width = self.config.stroke_width(width, height);

        tracing::debug!(
            "Hull of {} points has {} vertices, outline {:.1}px",
            points.len(),
            hull.len(),
            line_width
        );

        let mut canvas = gray_filled(width, height, 0);
        fill_convex_polygon(&mut canvas, &hull, 255);
        stroke_polygon(&mut canvas, &hull, line_width, 255);

        let alpha = if self.config.blur_sigma > 0.0 {
            let _blur = tracing::debug_span!("blur", sigma = self.config.blur_sigma).entered();
            imageops::blur(&canvas, self.config.blur_sigma)
        } else {
            canvas
        };

        AlphaMask::from_gray(alpha)
    }
}

/// Segment with the default tunables.
pub fn segment_region(frame: &Frame, guides: &[GuidePoint]) -> AlphaMask {
    RegionSegmenter::default().segment(frame, guides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn blank(width: u32, height: u32) -> Frame {
        Frame::from_fn(width, height, |_, _| Rgba([10, 10, 10, 255])).unwrap()
    }

    fn square_guides(lo: f64, hi: f64) -> Vec<GuidePoint> {
        vec![
            GuidePoint::new(lo, lo),
            GuidePoint::new(hi, lo),
            GuidePoint::new(hi, hi),
            GuidePoint::new(lo, hi),
        ]
    }

    #[test]
    fn square_guides_cover_centre_only() {
        let frame = blank(400, 400);
        let mask = segment_region(&frame, &square_guides(0.4, 0.6));

        assert_eq!(mask.dimensions(), (400, 400));
        assert!(mask.alpha(200, 200) > 200);
        assert_eq!(mask.alpha(0, 0), 0);
        assert_eq!(mask.alpha(399, 399), 0);
        assert_eq!(mask.alpha(0, 200), 0);
    }

    #[test]
    fn unblurred_hull_includes_outline_padding() {
        let frame = blank(200, 200);
        let segmenter = RegionSegmenter::new(SegmentConfig {
            blur_sigma: 0.0,
            ..SegmentConfig::default()
        });
        // hull spans 80..120, outline 24px pads it by 12px
        let mask = segmenter.segment(&frame, &square_guides(0.4, 0.6));
        assert_eq!(mask.alpha(100, 100), 255);
        assert_eq!(mask.alpha(70, 100), 255);
        assert_eq!(mask.alpha(66, 100), 0);
        assert_eq!(mask.alpha(10, 10), 0);
    }

    #[test]
    fn single_guide_point_yields_empty_mask() {
        let frame = blank(64, 64);
        let mask = segment_region(&frame, &[GuidePoint::new(0.5, 0.5)]);
        assert_eq!(mask.covered_count(), 0);
    }

    #[test]
    fn coincident_guide_points_yield_empty_mask() {
        let frame = blank(200, 200);
        let guides = [GuidePoint::new(0.5, 0.5), GuidePoint::new(0.5, 0.5)];
        let mask = segment_region(&frame, &guides);
        assert_eq!(mask.covered_count(), 0);
    }

    #[test]
    fn two_guide_points_yield_thin_band() {
        let frame = blank(200, 200);
        let segmenter = RegionSegmenter::new(SegmentConfig {
            blur_sigma: 0.0,
            ..SegmentConfig::default()
        });
        let mask = segmenter.segment(
            &frame,
            &[GuidePoint::new(0.25, 0.5), GuidePoint::new(0.75, 0.5)],
        );
        assert_eq!(mask.alpha(100, 100), 255);
        assert_eq!(mask.alpha(100, 20), 0);
        assert!(mask.covered_count() < 200 * 200 / 4);
    }

    #[test]
    fn out_of_range_guides_are_clamped() {
        let frame = blank(50, 50);
        let mask = segment_region(
            &frame,
            &[
                GuidePoint::new(-1.0, -1.0),
                GuidePoint::new(2.0, -1.0),
                GuidePoint::new(2.0, 2.0),
                GuidePoint::new(-1.0, 2.0),
            ],
        );
        // the whole frame is inside the clamped hull
        assert!(mask.as_gray().pixels().all(|p| p[0] > 0));
    }

    #[test]
    fn empty_guides_use_skin_heuristic() {
        let frame = Frame::from_fn(3, 3, |x, y| {
            if x == 1 && y == 1 {
                Rgba([200, 150, 150, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
        .unwrap();
        let mask = segment_region(&frame, &[]);
        assert_eq!(mask.alpha(1, 1), 255);
        assert_eq!(mask.covered_count(), 1);
    }
}
