use super::{letter_from_scores, LetterClassifier};
use crate::landmarks::{FeatureVector, FEATURE_LEN};
use anyhow::{Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;

/// Dense letter classifier over a single [1, 42] feature row
pub struct OnnxLetterClassifier {
    session: Session,
}

impl OnnxLetterClassifier {
    pub fn new<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let path = model_path.as_ref();

        tracing::info!("Loading letter classifier from {}", path.display());

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(2)?
            .commit_from_file(path)
            .with_context(|| format!("Failed to load model from {}", path.display()))?;

        tracing::info!("Letter classifier loaded");

        Ok(Self { session })
    }
}

impl LetterClassifier for OnnxLetterClassifier {
    fn classify(&mut self, features: &FeatureVector) -> Result<Option<char>> {
        let _span = tracing::debug_span!("classify").entered();

        let input = Tensor::from_array(([1usize, FEATURE_LEN], features.to_vec()))?;
        let outputs = self
            .session
            .run(ort::inputs![input])
            .context("Failed to run letter inference")?;

        let (_, scores) = outputs[0].try_extract_tensor::<f32>()?;
        let letter = letter_from_scores(scores);
        tracing::trace!("Predicted {:?}", letter);

        Ok(letter)
    }
}
