use super::CaptureSource;
use crate::frame::Frame;
use anyhow::{Context, Result};
use image::DynamicImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

pub struct WebcamCapture {
    camera: Camera,
    width: u32,
    height: u32,
}

impl WebcamCapture {
    pub fn new(device_index: u32, width: u32, height: u32) -> Result<Self> {
        tracing::info!(
            "Initializing webcam {} at {}x{}",
            device_index,
            width,
            height
        );

        let index = CameraIndex::Index(device_index);
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);

        let mut camera = Camera::new(index, requested).context("Failed to open camera")?;

        camera
            .open_stream()
            .context("Failed to open camera stream")?;

        tracing::info!("Webcam initialized successfully");

        Ok(Self {
            camera,
            width,
            height,
        })
    }
}

impl CaptureSource for WebcamCapture {
    fn capture_frame(&mut self) -> Result<Frame> {
        let raw = self.camera.frame().context("Failed to capture frame")?;

        let decoded = raw
            .decode_image::<RgbFormat>()
            .context("Failed to decode frame")?;

        let mut rgba = DynamicImage::ImageRgb8(decoded).into_rgba8();
        if rgba.dimensions() != (self.width, self.height) {
            rgba = image::imageops::resize(
                &rgba,
                self.width,
                self.height,
                image::imageops::FilterType::Triangle,
            );
        }

        Frame::from_image(rgba).context("Camera delivered an empty frame")
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
