mod gesture;
mod normalize;
mod onnx;
mod preprocess;

pub use gesture::is_space_gesture;
pub use normalize::{normalize, FeatureVector, LandmarkError, FEATURE_LEN};
pub use onnx::OnnxHandLandmarker;
pub use preprocess::Preprocessor;

use anyhow::Result;
use image::RgbImage;
use serde::Deserialize;

/// Number of keypoints in a MediaPipe hand skeleton
pub const HAND_LANDMARKS: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// A 2D keypoint in image coordinates (smaller y is higher on screen)
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "[f32; 2]")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

/// One detected hand. Length is only checked by the operations that need
/// exactly [`HAND_LANDMARKS`] points.
pub type LandmarkSet = Vec<Point>;

/// Trait for hand-pose backends
/// Allows swapping between ONNX models, recorded sessions, or test doubles
pub trait LandmarkDetector {
    /// Detect the most prominent hand in a frame
    ///
    /// Returns `None` when no hand is present. Points are in pixel
    /// coordinates of `frame`.
    fn detect(&mut self, frame: &RgbImage) -> Result<Option<LandmarkSet>>;
}
