use crate::segmentation::GuidePoint;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load one hand's guide points from a JSON array of `{"x": .., "y": ..}`.
///
/// An empty array is valid and selects the colour fallback.
pub fn load_guide_points<P: AsRef<Path>>(path: P) -> Result<Vec<GuidePoint>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read guide points from {}", path.display()))?;
    let points = parse_guide_points(&text)
        .with_context(|| format!("Invalid guide point file {}", path.display()))?;

    tracing::info!("Loaded {} guide points from {}", points.len(), path.display());
    Ok(points)
}

pub fn parse_guide_points(text: &str) -> Result<Vec<GuidePoint>> {
    let points: Vec<GuidePoint> =
        serde_json::from_str(text).context("Expected a JSON array of {x, y} objects")?;
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        let points = parse_guide_points(r#"[{"x": 0.1, "y": 0.2}, {"x": 1, "y": 0}]"#).unwrap();
        assert_eq!(points, vec![GuidePoint::new(0.1, 0.2), GuidePoint::new(1.0, 0.0)]);
    }

    #[test]
    fn empty_array_is_allowed() {
        assert!(parse_guide_points("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(parse_guide_points(r#"{"x": 0.1}"#).is_err());
        assert!(parse_guide_points(r#"[{"x": 0.1}]"#).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_guide_points("/nonexistent/guides.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read guide points"));
    }
}
