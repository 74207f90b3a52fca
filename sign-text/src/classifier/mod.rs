mod onnx;

pub use onnx::OnnxLetterClassifier;

use crate::landmarks::FeatureVector;
use anyhow::Result;

/// Output classes of the letter model, in index order
pub const ALPHABET: [char; 35] = [
    '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J',
    'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Trait for letter classifiers
/// Allows swapping between ONNX models, rule-based stand-ins, or no model at all
pub trait LetterClassifier {
    /// Predict the letter shown by a normalized hand
    ///
    /// Returns `None` when the model has no answer for this frame.
    fn classify(&mut self, features: &FeatureVector) -> Result<Option<char>>;
}

/// Fallback used when no model is configured; never predicts
#[derive(Debug, Default)]
pub struct NoClassifier;

impl LetterClassifier for NoClassifier {
    fn classify(&mut self, _features: &FeatureVector) -> Result<Option<char>> {
        Ok(None)
    }
}

/// Map class scores to a letter via argmax
///
/// Indices past the end of [`ALPHABET`] and empty/NaN-only score lists give `None`.
pub fn letter_from_scores(scores: &[f32]) -> Option<char> {
    let (best, _) = scores
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_nan())
        .max_by(|(_, a), (_, b)| a.total_cmp(b))?;
    ALPHABET.get(best).copied()
}
