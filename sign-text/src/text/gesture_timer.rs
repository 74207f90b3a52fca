use super::types::progress;
use std::time::{Duration, Instant};

/// Hold-to-fire timer for the space gesture, with a cooldown after firing
#[derive(Clone, Debug)]
pub struct SpaceGestureTimer {
    hold: Duration,
    cooldown: Duration,
    started: Option<Instant>,
    cooldown_until: Option<Instant>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureTick {
    pub progress: f32,
    pub fired: bool,
}

impl SpaceGestureTimer {
    pub fn new(hold: Duration, cooldown: Duration) -> Self {
        Self {
            hold,
            cooldown,
            started: None,
            cooldown_until: None,
        }
    }

    /// Feed one frame. Any frame without the gesture, or inside the
    /// cooldown, resets the hold.
    pub fn update(&mut self, gesture: bool, now: Instant) -> GestureTick {
        let cooling = self.cooldown_until.is_some_and(|until| now < until);
        if !gesture || cooling {
            self.started = None;
            return GestureTick::default();
        }

        let started = *self.started.get_or_insert(now);
        let progress = progress(now.saturating_duration_since(started), self.hold);
        if progress < 1.0 {
            return GestureTick {
                progress,
                fired: false,
            };
        }

        self.started = None;
        self.cooldown_until = Some(now + self.cooldown);
        GestureTick {
            progress,
            fired: true,
        }
    }

    pub fn reset(&mut self) {
        self.started = None;
        self.cooldown_until = None;
    }
}
