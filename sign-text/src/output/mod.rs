mod file_sink;

pub use file_sink::FileSink;

use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Trait for persisting finished sentences
pub trait SentenceSink {
    /// Store a non-empty, trimmed sentence; returns where it went
    fn save(&mut self, sentence: &str, at: DateTime<Local>) -> Result<PathBuf>;
}

/// Save `text` unless it is blank
///
/// Returns `Ok(None)` when there was nothing worth keeping.
pub fn save_sentence<S: SentenceSink + ?Sized>(
    sink: &mut S,
    text: &str,
    at: DateTime<Local>,
) -> Result<Option<PathBuf>> {
    let sentence = text.trim();
    if sentence.is_empty() {
        tracing::info!("No sentence to save");
        return Ok(None);
    }
    let path = sink.save(sentence, at)?;
    tracing::info!("Sentence saved to {}", path.display());
    Ok(Some(path))
}
