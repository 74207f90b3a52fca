use super::{prepare_frame, CaptureSource};
use anyhow::{Context, Result};
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

/// Webcam opened at its fastest frame rate
///
/// Hand shapes change quickly and the models run on a small processing
/// frame, so rate matters more than native resolution here.
pub struct WebcamCapture {
    camera: Camera,
    processing_size: (u32, u32),
}

impl WebcamCapture {
    /// Open a webcam; frames are delivered mirrored at `width` x `height`
    pub fn new(device_index: u32, width: u32, height: u32) -> Result<Self> {
        tracing::info!("Opening webcam {}", device_index);

        let format = RequestedFormatType::AbsoluteHighestFrameRate;
        let mut camera = Camera::new(
            CameraIndex::Index(device_index),
            RequestedFormat::new::<RgbFormat>(format),
        )
        .with_context(|| format!("Failed to open camera {}", device_index))?;
        camera
            .open_stream()
            .context("Failed to open camera stream")?;

        let native = camera.resolution();
        tracing::info!(
            "Webcam streaming at {}x{} @ {} fps",
            native.width(),
            native.height(),
            camera.frame_rate()
        );

        Ok(Self {
            camera,
            processing_size: (width, height),
        })
    }
}

impl CaptureSource for WebcamCapture {
    fn capture_frame(&mut self) -> Result<RgbImage> {
        let raw = self.camera.frame().context("Camera returned no frame")?;
        let decoded = raw
            .decode_image::<RgbFormat>()
            .context("Failed to decode camera frame")?;

        let (width, height) = self.processing_size;
        Ok(prepare_frame(&decoded, width, height))
    }

    fn resolution(&self) -> (u32, u32) {
        self.processing_size
    }
}

impl Drop for WebcamCapture {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            tracing::warn!("Failed to stop camera stream: {}", e);
        }
    }
}
