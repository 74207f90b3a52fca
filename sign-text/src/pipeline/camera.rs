use super::{Observation, ObservationSource};
use crate::capture::CaptureSource;
use crate::landmarks::LandmarkDetector;
use anyhow::Result;
use std::time::Instant;

/// Live source: grabs a frame, runs the hand model, stamps it with `Instant::now()`
pub struct CameraSource<C, D> {
    capture: C,
    detector: D,
}

impl<C, D> CameraSource<C, D>
where
    C: CaptureSource,
    D: LandmarkDetector,
{
    pub fn new(capture: C, detector: D) -> Self {
        Self { capture, detector }
    }
}

impl<C, D> ObservationSource for CameraSource<C, D>
where
    C: CaptureSource,
    D: LandmarkDetector,
{
    fn next_observation(&mut self) -> Result<Option<Observation>> {
        // A bad frame counts as "no hand" so the timers keep running
        let landmarks = match self.capture.capture_frame() {
            Ok(frame) => match self.detector.detect(&frame) {
                Ok(landmarks) => landmarks,
                Err(e) => {
                    tracing::warn!("Hand detection failed: {:#}", e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to capture frame: {:#}", e);
                None
            }
        };
        let at = Instant::now();

        Ok(Some(Observation {
            at,
            landmarks,
            label: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{LandmarkSet, Point};
    use anyhow::bail;
    use image::RgbImage;

    struct StillCamera;

    impl CaptureSource for StillCamera {
        fn capture_frame(&mut self) -> Result<RgbImage> {
            Ok(RgbImage::new(32, 24))
        }

        fn resolution(&self) -> (u32, u32) {
            (32, 24)
        }
    }

    struct Flaky {
        frame: usize,
    }

    impl LandmarkDetector for Flaky {
        fn detect(&mut self, _frame: &RgbImage) -> Result<Option<LandmarkSet>> {
            self.frame += 1;
            if self.frame == 2 {
                bail!("inference blew up");
            }
            Ok(Some(vec![Point::new(1.0, 2.0); 21]))
        }
    }

    /// Drops every second frame
    struct DroppingCamera {
        frame: usize,
    }

    impl CaptureSource for DroppingCamera {
        fn capture_frame(&mut self) -> Result<RgbImage> {
            self.frame += 1;
            if self.frame % 2 == 0 {
                bail!("VIDIOC_DQBUF timeout");
            }
            Ok(RgbImage::new(32, 24))
        }

        fn resolution(&self) -> (u32, u32) {
            (32, 24)
        }
    }

    struct AlwaysHand;

    impl LandmarkDetector for AlwaysHand {
        fn detect(&mut self, _frame: &RgbImage) -> Result<Option<LandmarkSet>> {
            Ok(Some(vec![Point::new(5.0, 5.0); 21]))
        }
    }

    #[test]
    fn capture_error_becomes_no_hand() {
        let mut source = CameraSource::new(DroppingCamera { frame: 0 }, AlwaysHand);

        let first = source.next_observation().unwrap().unwrap();
        assert!(first.landmarks.is_some());
        let dropped = source.next_observation().unwrap().unwrap();
        assert!(dropped.landmarks.is_none());
        assert!(dropped.at >= first.at);
        let third = source.next_observation().unwrap().unwrap();
        assert!(third.landmarks.is_some());
    }

    #[test]
    fn detector_error_becomes_no_hand() {
        let mut source = CameraSource::new(StillCamera, Flaky { frame: 0 });

        let first = source.next_observation().unwrap().unwrap();
        assert!(first.landmarks.is_some());
        let second = source.next_observation().unwrap().unwrap();
        assert!(second.landmarks.is_none());
        let third = source.next_observation().unwrap().unwrap();
        assert!(third.landmarks.is_some());
        assert!(third.at >= first.at);
    }
}
