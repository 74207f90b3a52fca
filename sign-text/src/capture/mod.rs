mod v4l_capture;

pub use v4l_capture::WebcamCapture;

use anyhow::Result;
use image::{imageops, RgbImage};

/// Trait for camera capture sources
pub trait CaptureSource {
    /// Capture a single frame, already mirrored and at processing size
    fn capture_frame(&mut self) -> Result<RgbImage>;

    /// Get the resolution of captured frames
    fn resolution(&self) -> (u32, u32);
}

/// Mirror a raw camera frame and scale it to the processing resolution
///
/// Signers read the preview like a mirror, so left/right are swapped
/// before any landmark is computed.
pub fn prepare_frame(frame: &RgbImage, width: u32, height: u32) -> RgbImage {
    let mirrored = imageops::flip_horizontal(frame);
    if mirrored.dimensions() == (width, height) {
        return mirrored;
    }
    imageops::resize(&mirrored, width, height, imageops::FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn mirrors_horizontally() {
        let mut frame = RgbImage::new(4, 2);
        frame.put_pixel(0, 1, Rgb([255, 0, 0]));

        let prepared = prepare_frame(&frame, 4, 2);
        assert_eq!(prepared.get_pixel(3, 1), &Rgb([255, 0, 0]));
        assert_eq!(prepared.get_pixel(0, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn scales_to_processing_size() {
        let frame = RgbImage::new(640, 480);
        assert_eq!(prepare_frame(&frame, 320, 240).dimensions(), (320, 240));
    }
}
