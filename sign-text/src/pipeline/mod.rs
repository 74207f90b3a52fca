mod camera;
mod replay;

pub use camera::CameraSource;
pub use replay::{ReplayFrame, ReplaySource};

use crate::classifier::LetterClassifier;
use crate::landmarks::{self, LandmarkSet};
use crate::text::DetectionEvent;
use anyhow::Result;
use std::time::Instant;

/// One frame's worth of hand data, stamped with a monotonic time
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub at: Instant,
    /// `None` when no hand was found (or the detector failed)
    pub landmarks: Option<LandmarkSet>,
    /// Letter already known for this frame (recorded sessions); skips the classifier
    pub label: Option<char>,
}

/// Trait for anything that yields hand observations frame by frame
pub trait ObservationSource {
    /// Next observation, or `None` once the source is exhausted
    fn next_observation(&mut self) -> Result<Option<Observation>>;
}

/// Turns landmarks into a detection event: space gesture first, classifier otherwise
pub struct FrameObserver {
    classifier: Box<dyn LetterClassifier>,
}

impl FrameObserver {
    pub fn new(classifier: Box<dyn LetterClassifier>) -> Self {
        Self { classifier }
    }

    pub fn observe(&mut self, observation: &Observation) -> DetectionEvent {
        let Some(hand) = observation.landmarks.as_deref() else {
            return DetectionEvent::no_hand();
        };

        if landmarks::is_space_gesture(hand) {
            return DetectionEvent::space_gesture();
        }

        if let Some(label) = observation.label {
            return DetectionEvent::letter(label);
        }

        let features = match landmarks::normalize(hand) {
            Ok(features) => features,
            Err(e) => {
                tracing::warn!("Skipping classification: {}", e);
                return DetectionEvent::hand_only();
            }
        };

        match self.classifier.classify(&features) {
            Ok(Some(letter)) => DetectionEvent::letter(letter),
            Ok(None) => DetectionEvent::hand_only(),
            Err(e) => {
                tracing::warn!("Classifier failed for this frame: {:#}", e);
                DetectionEvent::hand_only()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{FeatureVector, Point, HAND_LANDMARKS};
    use anyhow::bail;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Fixed {
        letter: Option<char>,
        calls: Rc<Cell<usize>>,
    }

    impl LetterClassifier for Fixed {
        fn classify(&mut self, _features: &FeatureVector) -> Result<Option<char>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.letter)
        }
    }

    struct Broken;

    impl LetterClassifier for Broken {
        fn classify(&mut self, _features: &FeatureVector) -> Result<Option<char>> {
            bail!("model unavailable")
        }
    }

    fn observation(landmarks: Option<LandmarkSet>) -> Observation {
        Observation {
            at: Instant::now(),
            landmarks,
            label: None,
        }
    }

    fn flat_hand() -> LandmarkSet {
        (0..HAND_LANDMARKS)
            .map(|i| Point::new(10.0 * i as f32, 200.0 - 3.0 * i as f32))
            .collect()
    }

    fn h_hand() -> LandmarkSet {
        let mut pts = vec![Point::new(100.0, 200.0); HAND_LANDMARKS];
        pts[6] = Point::new(90.0, 110.0);
        pts[8] = Point::new(90.0, 70.0);
        pts[10] = Point::new(96.0, 110.0);
        pts[12] = Point::new(96.0, 70.0);
        pts[14] = Point::new(102.0, 120.0);
        pts[16] = Point::new(102.0, 145.0);
        pts[18] = Point::new(130.0, 120.0);
        pts[20] = Point::new(130.0, 145.0);
        pts[4] = Point::new(60.0, 150.0);
        pts
    }

    #[test]
    fn no_landmarks_is_no_hand() {
        let calls = Rc::new(Cell::new(0));
        let mut observer = FrameObserver::new(Box::new(Fixed {
            letter: Some('A'),
            calls: calls.clone(),
        }));

        assert_eq!(observer.observe(&observation(None)), DetectionEvent::no_hand());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn classifies_normal_hand() {
        let calls = Rc::new(Cell::new(0));
        let mut observer = FrameObserver::new(Box::new(Fixed {
            letter: Some('A'),
            calls: calls.clone(),
        }));

        let event = observer.observe(&observation(Some(flat_hand())));
        assert_eq!(event, DetectionEvent::letter('A'));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn space_gesture_skips_classifier() {
        let calls = Rc::new(Cell::new(0));
        let mut observer = FrameObserver::new(Box::new(Fixed {
            letter: Some('H'),
            calls: calls.clone(),
        }));

        let event = observer.observe(&observation(Some(h_hand())));
        assert_eq!(event, DetectionEvent::space_gesture());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn recorded_label_replaces_classifier() {
        let calls = Rc::new(Cell::new(0));
        let mut observer = FrameObserver::new(Box::new(Fixed {
            letter: Some('A'),
            calls: calls.clone(),
        }));

        let mut obs = observation(Some(flat_hand()));
        obs.label = Some('Q');
        assert_eq!(observer.observe(&obs), DetectionEvent::letter('Q'));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn failures_keep_hand_present_without_letter() {
        let mut observer = FrameObserver::new(Box::new(Broken));
        assert_eq!(
            observer.observe(&observation(Some(flat_hand()))),
            DetectionEvent::hand_only()
        );

        let mut short = flat_hand();
        short.truncate(5);
        assert_eq!(
            observer.observe(&observation(Some(short))),
            DetectionEvent::hand_only()
        );
    }
}
