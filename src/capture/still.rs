use super::CaptureSource;
use crate::frame::Frame;
use anyhow::{Context, Result};
use std::path::Path;

/// A still photo loaded once and replayed as every captured frame.
pub struct ImageFileSource {
    frame: Frame,
}

impl ImageFileSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Loading photo from {}", path.display());

        let image = image::open(path)
            .with_context(|| format!("Failed to open image {}", path.display()))?
            .into_rgba8();
        let frame = Frame::from_image(image)
            .with_context(|| format!("Image {} has no pixels", path.display()))?;

        tracing::info!("Photo is {}x{}", frame.width(), frame.height());
        Ok(Self { frame })
    }

    pub fn from_frame(frame: Frame) -> Self {
        Self { frame }
    }
}

impl CaptureSource for ImageFileSource {
    fn capture_frame(&mut self) -> Result<Frame> {
        Ok(self.frame.clone())
    }

    fn resolution(&self) -> (u32, u32) {
        self.frame.dimensions()
    }
}
