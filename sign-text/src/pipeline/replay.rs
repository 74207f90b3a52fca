use super::{Observation, ObservationSource};
use crate::landmarks::LandmarkSet;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

/// One line of a recorded session
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ReplayFrame {
    /// Seconds since the start of the recording
    pub t: f64,
    #[serde(default)]
    pub landmarks: Option<LandmarkSet>,
    #[serde(default)]
    pub label: Option<char>,
}

/// Plays back a JSON-lines recording, one frame per line
pub struct ReplaySource<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
    base: Instant,
}

impl ReplaySource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, base: Instant) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Replaying landmarks from {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Failed to open replay file {}", path.display()))?;
        Ok(Self::from_reader(BufReader::new(file), base))
    }
}

impl<R: BufRead> ReplaySource<R> {
    /// Frame timestamps are offsets from `base`
    pub fn from_reader(reader: R, base: Instant) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            base,
        }
    }
}

impl<R: BufRead> ObservationSource for ReplaySource<R> {
    fn next_observation(&mut self) -> Result<Option<Observation>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line_no = self.line_no;
            let line = line.with_context(|| format!("Failed to read replay line {}", line_no))?;
            if line.trim().is_empty() {
                continue;
            }

            let frame: ReplayFrame = serde_json::from_str(&line)
                .with_context(|| format!("Invalid replay frame on line {}", line_no))?;
            let offset = Duration::try_from_secs_f64(frame.t)
                .with_context(|| format!("Invalid timestamp {} on line {}", frame.t, line_no))?;
            let at = self
                .base
                .checked_add(offset)
                .with_context(|| {
                    format!("Timestamp {} out of range on line {}", frame.t, line_no)
                })?;

            return Ok(Some(Observation {
                at,
                landmarks: frame.landmarks,
                label: frame.label,
            }));
        }
        Ok(None)
    }
}
