mod dictionary;
mod gesture_timer;
mod machine;
mod signs;
mod spelling;
pub mod types;

pub use dictionary::WordListCorrector;
pub use gesture_timer::{GestureTick, SpaceGestureTimer};
pub use machine::TextSession;
pub use signs::{text_to_signs, SignToken};
pub use spelling::{CasePreserving, Passthrough, SpellCorrector};
pub use types::{Commit, DetectionEvent, TextConfig, TextSnapshot};
