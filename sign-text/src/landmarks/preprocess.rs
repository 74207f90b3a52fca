use image::{imageops, RgbImage};
use ndarray::Array4;

/// Preprocessor for converting camera frames into hand-model input tensors
pub struct Preprocessor {
    target_width: u32,
    target_height: u32,
}

impl Preprocessor {
    pub fn new(target_width: u32, target_height: u32) -> Self {
        Self {
            target_width,
            target_height,
        }
    }

    /// Preprocess an RGB image into a normalized NHWC tensor
    ///
    /// Steps:
    /// 1. Resize to target dimensions (no letterboxing)
    /// 2. Convert to float and normalize to [0, 1]
    ///
    /// Returns: Array4<f32> with shape [1, height, width, 3]
    pub fn preprocess(&self, image: &RgbImage) -> Array4<f32> {
        let _span = tracing::debug_span!("preprocess").entered();

        let resized = if image.dimensions() != (self.target_width, self.target_height) {
            imageops::resize(
                image,
                self.target_width,
                self.target_height,
                imageops::FilterType::Triangle,
            )
        } else {
            image.clone()
        };

        let (width, height) = resized.dimensions();
        let mut tensor = Array4::<f32>::zeros((1, height as usize, width as usize, 3));

        for (x, y, pixel) in resized.enumerate_pixels() {
            for c in 0..3 {
                tensor[[0, y as usize, x as usize, c]] = pixel[c] as f32 / 255.0;
            }
        }

        tensor
    }

    /// Map a coordinate in model input space back to integer pixels of the
    /// original frame, clamped inside it
    pub fn to_frame_pixels(
        &self,
        x: f32,
        y: f32,
        frame_width: u32,
        frame_height: u32,
    ) -> (f32, f32) {
        let px = (x * frame_width as f32 / self.target_width as f32)
            .floor()
            .clamp(0.0, frame_width.saturating_sub(1) as f32);
        let py = (y * frame_height as f32 / self.target_height as f32)
            .floor()
            .clamp(0.0, frame_height.saturating_sub(1) as f32);
        (px, py)
    }
}
