use crate::edges::EdgeConfig;
use crate::segmentation::SegmentConfig;

/// All processing tunables for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    pub edges: EdgeConfig,
    pub segmentation: SegmentConfig,
}

impl PipelineConfig {
    /// Override the silhouette blur radius.
    pub fn with_blur_sigma(mut self, sigma: f32) -> Self {
        self.segmentation.blur_sigma = sigma.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_literal_constants() {
        let config = PipelineConfig::default();
        assert_eq!(config.edges.percentile, 0.55);
        assert_eq!(config.edges.fallback, 20.0);
        assert_eq!(config.edges.floor, 18.0);
        assert_eq!(config.edges.min_neighbors, 3);
        assert_eq!(config.segmentation.blur_sigma, 28.0);
        assert_eq!(config.segmentation.stroke_min_width, 24.0);
        assert_eq!(config.segmentation.cr_range, (8.0, 70.0));
        assert_eq!(config.segmentation.cb_range, (-25.0, 25.0));
        assert_eq!(config.segmentation.min_luma, 30.0);
    }

    #[test]
    fn negative_blur_is_disabled() {
        let config = PipelineConfig::default().with_blur_sigma(-3.0);
        assert_eq!(config.segmentation.blur_sigma, 0.0);
    }
}
