use super::preprocess::Preprocessor;
use super::{LandmarkDetector, LandmarkSet, Point, HAND_LANDMARKS};
use anyhow::{ensure, Context, Result};
use image::RgbImage;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;

/// Side length of the MediaPipe hand landmark model input
const INPUT_SIZE: u32 = 224;

/// Single-hand landmark model (MediaPipe hand_landmark exported to ONNX)
///
/// Inputs: [1, 224, 224, 3] RGB in [0, 1].
/// Outputs: 21 x (x, y, z) in input pixels, then the hand presence score.
pub struct OnnxHandLandmarker {
    session: Session,
    preprocessor: Preprocessor,
    min_presence: f32,
}

impl OnnxHandLandmarker {
    pub fn new<P: AsRef<Path>>(model_path: P, min_presence: f32) -> Result<Self> {
        let path = model_path.as_ref();

        tracing::info!("Loading hand landmark model from {}", path.display());

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(2)?
            .commit_from_file(path)
            .with_context(|| format!("Failed to load model from {}", path.display()))?;

        tracing::info!("Hand landmark model loaded");

        Ok(Self {
            session,
            preprocessor: Preprocessor::new(INPUT_SIZE, INPUT_SIZE),
            min_presence: min_presence.clamp(0.0, 1.0),
        })
    }
}

impl LandmarkDetector for OnnxHandLandmarker {
    fn detect(&mut self, frame: &RgbImage) -> Result<Option<LandmarkSet>> {
        let _span = tracing::debug_span!("hand_landmarks").entered();

        let tensor = self.preprocessor.preprocess(frame);
        let (n, h, w, c) = tensor.dim();
        let input = Tensor::from_array(([n, h, w, c], tensor.into_raw_vec()))?;

        let outputs = self
            .session
            .run(ort::inputs![input])
            .context("Failed to run hand landmark inference")?;

        let (_, presence) = outputs[1].try_extract_tensor::<f32>()?;
        let score = presence.first().copied().unwrap_or(0.0);
        if score < self.min_presence {
            tracing::debug!("No hand (presence {:.2})", score);
            return Ok(None);
        }

        let (_, coords) = outputs[0].try_extract_tensor::<f32>()?;
        ensure!(
            coords.len() >= HAND_LANDMARKS * 3,
            "hand landmark output has {} values, expected {}",
            coords.len(),
            HAND_LANDMARKS * 3
        );

        let (frame_width, frame_height) = frame.dimensions();
        let landmarks = coords
            .chunks_exact(3)
            .take(HAND_LANDMARKS)
            .map(|xyz| {
                let (x, y) = self
                    .preprocessor
                    .to_frame_pixels(xyz[0], xyz[1], frame_width, frame_height);
                Point::new(x, y)
            })
            .collect();

        Ok(Some(landmarks))
    }
}
