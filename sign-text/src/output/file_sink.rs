use super::SentenceSink;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;

/// Writes each sentence to its own timestamped text file
pub struct FileSink {
    dir: PathBuf,
    name: Option<String>,
}

impl FileSink {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            name: None,
        }
    }

    /// Use `<dir>/<name>.txt` instead of a timestamped file name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn path_for(&self, at: &DateTime<Local>) -> PathBuf {
        let file_name = match &self.name {
            Some(name) => format!("{}.txt", name),
            None => format!("sentence_{}.txt", at.format("%Y%m%d_%H%M%S")),
        };
        self.dir.join(file_name)
    }
}

impl SentenceSink for FileSink {
    fn save(&mut self, sentence: &str, at: DateTime<Local>) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let path = self.path_for(&at);
        let contents = format!(
            "ISL Sentence - {}\n{}\n{}\n",
            at.format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(50),
            sentence.trim()
        );
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::save_sentence;
    use chrono::TimeZone;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 12, 5, 7).unwrap()
    }

    #[test]
    fn writes_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().join("saved_sentences"));

        let path = sink.save("HELLO WORLD", noon()).unwrap();
        assert_eq!(path.file_name().unwrap(), "sentence_20240309_120507.txt");

        let contents = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "ISL Sentence - 2024-03-09 12:05:07");
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[2], "HELLO WORLD");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn named_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path()).with_name("greeting");

        let path = sink.save("HI", noon()).unwrap();
        assert_eq!(path, dir.path().join("greeting.txt"));
    }

    #[test]
    fn blank_text_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut sink = FileSink::new(&out);

        assert_eq!(save_sentence(&mut sink, "   ", noon()).unwrap(), None);
        assert!(!out.exists());

        let saved = save_sentence(&mut sink, "HI THERE ", noon()).unwrap().unwrap();
        assert!(fs::read_to_string(saved).unwrap().ends_with("HI THERE\n"));
    }
}
