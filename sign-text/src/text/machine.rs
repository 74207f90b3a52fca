use super::gesture_timer::SpaceGestureTimer;
use super::spelling::{Passthrough, SpellCorrector};
use super::types::{progress, Commit, DetectionEvent, TextConfig, TextSnapshot};
use std::time::Instant;

/// Per-session word and sentence builder
///
/// Runs two clocks against the same timestamps: a letter is appended once it
/// has been predicted unchanged for `hold_time`, and the pending word moves
/// into the sentence once the hand has been gone for `space_delay` (or the
/// space gesture has been held). Callers own one instance per session and
/// feed it frames in arrival order.
pub struct TextSession {
    config: TextConfig,
    corrector: Box<dyn SpellCorrector + Send>,

    current_word: String,
    current_sentence: String,

    last_prediction: Option<char>,
    prediction_start: Instant,
    // None until the first letter is committed
    last_commit: Option<Instant>,
    no_hand_start: Instant,
    hand_present_last_frame: bool,

    gesture: SpaceGestureTimer,
}

impl TextSession {
    pub fn new(config: TextConfig, started_at: Instant) -> Self {
        let gesture = SpaceGestureTimer::new(config.space_hold_time, config.space_cooldown);
        Self {
            config,
            corrector: Box::new(Passthrough),
            current_word: String::new(),
            current_sentence: String::new(),
            last_prediction: None,
            prediction_start: started_at,
            last_commit: None,
            no_hand_start: started_at,
            hand_present_last_frame: false,
            gesture,
        }
    }

    /// Replace the word-boundary spelling corrector
    pub fn with_corrector<C>(mut self, corrector: C) -> Self
    where
        C: SpellCorrector + Send + 'static,
    {
        self.corrector = Box::new(corrector);
        self
    }

    pub fn config(&self) -> &TextConfig {
        &self.config
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn current_sentence(&self) -> &str {
        &self.current_sentence
    }

    /// Advance the session by one frame
    ///
    /// `now` must come from a monotonic clock and never go backwards.
    pub fn process(&mut self, event: &DetectionEvent, now: Instant) -> TextSnapshot {
        let mut committed = Vec::new();

        // A space-gesture frame never carries a letter
        let letter = event
            .letter
            .filter(|c| *c != ' ' && event.hand_present && !event.is_space_gesture);

        if let Some(letter) = letter {
            if self.last_prediction == Some(letter) {
                let held = now.saturating_duration_since(self.prediction_start);
                let since_commit = self
                    .last_commit
                    .map_or(self.config.hold_time, |t| now.saturating_duration_since(t));
                if held >= self.config.hold_time && since_commit >= self.config.hold_time {
                    self.current_word.push(letter);
                    self.last_commit = Some(now);
                    // Re-arm: the same letter needs another full hold to repeat
                    self.prediction_start = now;
                    tracing::debug!("Committed letter {} -> {:?}", letter, self.current_word);
                    committed.push(Commit::Letter(letter));
                }
            } else {
                self.last_prediction = Some(letter);
                self.prediction_start = now;
            }
        }

        let gesture = self
            .gesture
            .update(event.hand_present && event.is_space_gesture, now);
        if gesture.fired {
            committed.push(self.end_word_by_gesture());
        }

        if !event.hand_present {
            if self.hand_present_last_frame {
                self.no_hand_start = now;
            } else if !self.current_word.is_empty()
                && now.saturating_duration_since(self.no_hand_start) >= self.config.space_delay
            {
                committed.push(self.flush_word());
                self.no_hand_start = now;
            }
            self.last_prediction = None;
            self.prediction_start = now;
        }

        self.hand_present_last_frame = event.hand_present;

        let letter_progress = match letter {
            Some(c) if self.last_prediction == Some(c) => progress(
                now.saturating_duration_since(self.prediction_start),
                self.config.hold_time,
            ),
            _ => 0.0,
        };
        let space_progress = if !event.hand_present && !self.current_word.is_empty() {
            progress(
                now.saturating_duration_since(self.no_hand_start),
                self.config.space_delay,
            )
        } else {
            0.0
        };

        TextSnapshot {
            current_word: self.current_word.clone(),
            current_sentence: self.current_sentence.clone(),
            letter_progress,
            space_progress,
            gesture_progress: gesture.progress,
            committed,
        }
    }

    /// Clear the word being spelled
    pub fn reset_word(&mut self) {
        self.current_word.clear();
    }

    /// Clear both the word and the sentence
    ///
    /// A space gesture already being held starts over, so it can't land a
    /// stray space at the start of the fresh sentence.
    pub fn reset_sentence(&mut self) {
        self.current_word.clear();
        self.current_sentence.clear();
        self.gesture.reset();
    }

    /// Remove the last letter of the current word
    pub fn backspace(&mut self) -> bool {
        self.current_word.pop().is_some()
    }

    /// Sentence plus the unfinished word, without changing anything
    pub fn finalize(&self) -> String {
        format!("{}{}", self.current_sentence, self.current_word)
    }

    fn flush_word(&mut self) -> Commit {
        let raw = std::mem::take(&mut self.current_word);
        let corrected = self.corrector.correct(&raw);
        if corrected != raw {
            tracing::info!("Corrected {:?} -> {:?}", raw, corrected);
        }
        self.current_sentence.push_str(&corrected);
        self.current_sentence.push(' ');
        tracing::debug!("Sentence now {:?}", self.current_sentence);
        Commit::Word { raw, corrected }
    }

    fn end_word_by_gesture(&mut self) -> Commit {
        if !self.current_word.is_empty() {
            return self.flush_word();
        }
        if !self.current_sentence.ends_with(' ') {
            self.current_sentence.push(' ');
        }
        Commit::Space
    }
}
