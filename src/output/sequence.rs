use super::OutputSink;
use anyhow::{Context, Result};
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Numbered PNG files in a directory: `<prefix>_000.png`, `<prefix>_001.png`, ...
pub struct PngSequence {
    dir: PathBuf,
    prefix: String,
    next: usize,
    width: u32,
    height: u32,
}

impl PngSequence {
    pub fn new<P: AsRef<Path>>(dir: P, prefix: &str, width: u32, height: u32) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

        Ok(Self {
            dir,
            prefix: prefix.to_string(),
            next: 0,
            width,
            height,
        })
    }

    pub fn written(&self) -> usize {
        self.next
    }

    fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}_{:03}.png", self.prefix, index))
    }
}

impl OutputSink for PngSequence {
    fn write_frame(&mut self, frame: &RgbaImage) -> Result<()> {
        let path = self.path_for(self.next);
        frame
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Wrote {}", path.display());
        self.next += 1;
        Ok(())
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Save a single image, creating parent directories.
pub fn save_png<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}
