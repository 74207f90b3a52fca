use super::{Point, HAND_LANDMARKS, WRIST};
use thiserror::Error;

/// Flattened (x, y) pairs for every landmark
pub const FEATURE_LEN: usize = HAND_LANDMARKS * 2;

/// Classifier input: wrist-relative coordinates scaled into [-1, 1]
pub type FeatureVector = [f32; FEATURE_LEN];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LandmarkError {
    #[error("expected {expected} hand landmarks, got {actual}")]
    InvalidLandmarkCount { expected: usize, actual: usize },
}

/// Convert a landmark set into a translation- and scale-invariant feature vector
///
/// Steps:
/// 1. Subtract the wrist (landmark 0) from every point
/// 2. Flatten into x0, y0, x1, y1, ...
/// 3. Divide by the largest absolute component, unless every component is zero
pub fn normalize(landmarks: &[Point]) -> Result<FeatureVector, LandmarkError> {
    if landmarks.len() != HAND_LANDMARKS {
        return Err(LandmarkError::InvalidLandmarkCount {
            expected: HAND_LANDMARKS,
            actual: landmarks.len(),
        });
    }

    let base = landmarks[WRIST];
    let mut features = [0.0f32; FEATURE_LEN];
    for (i, point) in landmarks.iter().enumerate() {
        features[2 * i] = point.x - base.x;
        features[2 * i + 1] = point.y - base.y;
    }

    let max_abs = features.iter().fold(0.0f32, |acc, v| acc.max(v.abs()));
    if max_abs > 0.0 {
        for v in features.iter_mut() {
            *v /= max_abs;
        }
    }

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hand() -> Vec<Point> {
        (0..HAND_LANDMARKS)
            .map(|i| Point::new(100.0 + (i as f32 * 7.0) % 40.0, 200.0 - i as f32 * 5.0))
            .collect()
    }

    #[test]
    fn wrist_becomes_origin() {
        let features = normalize(&sample_hand()).unwrap();
        assert_eq!(features[0], 0.0);
        assert_eq!(features[1], 0.0);
    }

    #[test]
    fn components_stay_in_unit_range() {
        let features = normalize(&sample_hand()).unwrap();
        assert!(features.iter().all(|v| (-1.0..=1.0).contains(v)));
        assert!(features.iter().any(|v| v.abs() == 1.0));
    }

    #[test]
    fn shifted_hand_gives_same_features() {
        let hand = sample_hand();
        let shifted: Vec<Point> = hand.iter().map(|p| Point::new(p.x + 37.0, p.y - 12.0)).collect();

        let a = normalize(&hand).unwrap();
        let b = normalize(&shifted).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-6, "{x} vs {y}");
        }
    }

    #[test]
    fn scaled_hand_gives_same_features() {
        let hand = sample_hand();
        let scaled: Vec<Point> = hand.iter().map(|p| Point::new(p.x * 3.0, p.y * 3.0)).collect();

        let a = normalize(&hand).unwrap();
        let b = normalize(&scaled).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-5);
        }
    }

    #[test]
    fn identical_points_give_zero_vector() {
        let hand = vec![Point::new(42.0, 17.0); HAND_LANDMARKS];
        let features = normalize(&hand).unwrap();
        assert!(features.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let hand = vec![Point::default(); 20];
        assert_eq!(
            normalize(&hand),
            Err(LandmarkError::InvalidLandmarkCount {
                expected: 21,
                actual: 20
            })
        );
        assert!(normalize(&[]).is_err());
    }
}
