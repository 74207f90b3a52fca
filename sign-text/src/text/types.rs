use std::time::Duration;

/// Timing parameters for turning held hand shapes into text
#[derive(Clone, Debug, PartialEq)]
pub struct TextConfig {
    /// How long a letter must be predicted unchanged before it is appended
    pub hold_time: Duration,
    /// How long the hand must be gone before the pending word is flushed
    pub space_delay: Duration,
    /// How long the space gesture must be held to end a word
    pub space_hold_time: Duration,
    /// Dead time after a space gesture fires
    pub space_cooldown: Duration,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            hold_time: Duration::from_millis(1500),
            space_delay: Duration::from_secs(3),
            space_hold_time: Duration::from_millis(1500),
            space_cooldown: Duration::from_millis(1500),
        }
    }
}

/// What the detector saw in one frame. Consumed immediately, never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DetectionEvent {
    pub hand_present: bool,
    pub letter: Option<char>,
    pub is_space_gesture: bool,
}

impl DetectionEvent {
    pub fn no_hand() -> Self {
        Self::default()
    }

    /// Hand visible but nothing classified (model missing or failed)
    pub fn hand_only() -> Self {
        Self {
            hand_present: true,
            ..Self::default()
        }
    }

    pub fn letter(letter: char) -> Self {
        Self {
            hand_present: true,
            letter: Some(letter),
            is_space_gesture: false,
        }
    }

    pub fn space_gesture() -> Self {
        Self {
            hand_present: true,
            letter: None,
            is_space_gesture: true,
        }
    }
}

/// Text committed during a single `process` call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Commit {
    Letter(char),
    /// A word moved into the sentence. `corrected` is what was appended.
    Word { raw: String, corrected: String },
    /// Space gesture with no pending word
    Space,
}

/// State exposed to the presentation layer after each frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextSnapshot {
    pub current_word: String,
    pub current_sentence: String,
    /// Progress towards committing the held letter, 0..=1
    pub letter_progress: f32,
    /// Progress towards flushing the word through hand absence, 0..=1
    pub space_progress: f32,
    /// Progress towards the space gesture firing, 0..=1
    pub gesture_progress: f32,
    pub committed: Vec<Commit>,
}

/// `elapsed / total` capped at 1; a zero `total` counts as complete
pub(crate) fn progress(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / total.as_secs_f32()).min(1.0)
}
