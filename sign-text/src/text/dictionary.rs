use super::spelling::SpellCorrector;
use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Word-list spelling corrector, one edit deep
///
/// Every dictionary word is indexed under itself and each single-character
/// deletion of it. A lookup deletes one character from the input and
/// collects every word sharing a key, then keeps candidates within one
/// insertion, deletion, substitution or adjacent swap. The most frequent
/// candidate wins; ties go to the alphabetically first word.
///
/// Words are stored lower-case. Wrap in [`super::CasePreserving`] to
/// correct signed (upper-case) words.
#[derive(Clone, Debug, Default)]
pub struct WordListCorrector {
    counts: HashMap<String, u64>,
    deletes: HashMap<String, HashSet<String>>,
}

impl WordListCorrector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a word list: one word per line, optionally followed by a count
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open dictionary {}", path.display()))?;
        let corrector = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to read dictionary {}", path.display()))?;
        tracing::info!("Loaded {} dictionary words from {}", corrector.len(), path.display());
        Ok(corrector)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut corrector = Self::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            if word.starts_with('#') {
                continue;
            }
            let count = match fields.next() {
                Some(count) => count
                    .parse()
                    .with_context(|| format!("Invalid count {:?} on line {}", count, i + 1))?,
                None => 1,
            };
            corrector.insert(word, count);
        }
        Ok(corrector)
    }

    /// Add a word, accumulating its count if already present
    pub fn insert(&mut self, word: &str, count: u64) {
        let word = word.to_lowercase();
        for key in single_deletes(&word).into_iter().chain([word.clone()]) {
            self.deletes.entry(key).or_default().insert(word.clone());
        }
        *self.counts.entry(word).or_default() += count;
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Best dictionary word within one edit, or `None`
    pub fn suggest(&self, word: &str) -> Option<&str> {
        if let Some((known, _)) = self.counts.get_key_value(word) {
            return Some(known);
        }

        let mut keys = single_deletes(word);
        keys.push(word.to_string());

        let mut candidates = HashSet::new();
        for key in &keys {
            if let Some(words) = self.deletes.get(key) {
                candidates.extend(words.iter().map(String::as_str));
            }
        }

        candidates
            .into_iter()
            .filter(|candidate| within_one_edit(word, candidate))
            .max_by(|a, b| self.counts[*a].cmp(&self.counts[*b]).then_with(|| b.cmp(a)))
    }
}

impl SpellCorrector for WordListCorrector {
    fn correct(&self, word: &str) -> String {
        self.suggest(word).unwrap_or(word).to_string()
    }
}

fn single_deletes(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    (0..chars.len())
        .map(|i| {
            chars[..i]
                .iter()
                .chain(&chars[i + 1..])
                .collect::<String>()
        })
        .collect()
}

/// Optimal string alignment distance <= 1
fn within_one_edit(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    let (a_rest, b_rest) = (&a[prefix..], &b[prefix..]);

    match (a_rest.len(), b_rest.len()) {
        (0, 0) => true,
        (x, y) if x == y => {
            let substituted = a_rest[1..] == b_rest[1..];
            let swapped = x >= 2
                && a_rest[0] == b_rest[1]
                && a_rest[1] == b_rest[0]
                && a_rest[2..] == b_rest[2..];
            substituted || swapped
        }
        (x, y) if x == y + 1 => a_rest[1..] == *b_rest,
        (x, y) if y == x + 1 => *a_rest == b_rest[1..],
        _ => false,
    }
}
