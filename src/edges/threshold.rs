use super::types::{EdgeClass, EdgeConfig, EdgeMask};
use image::GrayImage;

/// Data-dependent binarization threshold for a gradient buffer.
///
/// Takes the magnitude at rank `floor(percentile * count)` of the sorted
/// samples; a missing or zero sample is replaced by `fallback`. The result
/// is `max(floor, sample * scale)`.
pub fn adaptive_threshold(gradient: &GrayImage, config: &EdgeConfig) -> f64 {
    let mut values = gradient.as_raw().clone();
    let rank = (values.len() as f64 * config.percentile).floor() as usize;

    let sample = if rank < values.len() {
        let (_, nth, _) = values.select_nth_unstable(rank);
        *nth
    } else {
        0
    };

    let base = if sample == 0 {
        config.fallback
    } else {
        sample as f64
    };

    (base * config.scale).max(config.floor)
}

/// Classify every pixel whose magnitude strictly exceeds `threshold` as edge.
pub fn binarize(gradient: &GrayImage, threshold: f64) -> EdgeMask {
    let (width, height) = gradient.dimensions();
    let classes = gradient
        .as_raw()
        .iter()
        .map(|&m| {
            if m as f64 > threshold {
                EdgeClass::Edge
            } else {
                EdgeClass::Background
            }
        })
        .collect();

    EdgeMask::from_parts(width, height, classes)
}
