//! Runs the edge detector and region segmenter on one frame.
//!
//! The two units share nothing but a read-only borrow of the frame, so
//! they are forked onto the rayon pool and joined before returning.

use crate::config::PipelineConfig;
use crate::edges::{EdgeDetector, EdgeMask};
use crate::frame::Frame;
use crate::segmentation::{AlphaMask, GuidePoint, RegionSegmenter};

/// Both masks for one frame, sized like the frame.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub edges: EdgeMask,
    pub mask: AlphaMask,
}

/// Configured pair of processing units.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    detector: EdgeDetector,
    segmenter: RegionSegmenter,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            detector: EdgeDetector::new(config.edges),
            segmenter: RegionSegmenter::new(config.segmentation),
        }
    }

    /// Process one frame. Both units run concurrently.
    pub fn process(&self, frame: &Frame, guides: &[GuidePoint]) -> PipelineOutput {
        let _span = tracing::debug_span!("process", width = frame.width(), height = frame.height())
            .entered();

        let (edges, mask) = rayon::join(
            || self.detector.detect(frame),
            || self.segmenter.segment(frame, guides),
        );

        PipelineOutput { edges, mask }
    }
}

/// Process one frame with the default tunables.
pub fn process(frame: &Frame, guides: &[GuidePoint]) -> PipelineOutput {
    Pipeline::default().process(frame, guides)
}
