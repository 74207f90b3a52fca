/// Trait for spelling correction at word boundaries
///
/// Implementations return the word unchanged when they have nothing better.
/// They must not fail: a broken dictionary is a passthrough.
pub trait SpellCorrector {
    fn correct(&self, word: &str) -> String;
}

/// Default corrector: returns every word as signed
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl SpellCorrector for Passthrough {
    fn correct(&self, word: &str) -> String {
        word.to_string()
    }
}

impl<F> SpellCorrector for F
where
    F: Fn(&str) -> String,
{
    fn correct(&self, word: &str) -> String {
        self(word)
    }
}

/// Queries a lower-case dictionary and restores the signer's capitalization
///
/// The inner corrector sees the word lower-cased. If it suggests something
/// different, the suggestion is capitalized when the original started with
/// an upper-case letter.
#[derive(Clone, Debug, Default)]
pub struct CasePreserving<C> {
    inner: C,
}

impl<C: SpellCorrector> CasePreserving<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: SpellCorrector> SpellCorrector for CasePreserving<C> {
    fn correct(&self, word: &str) -> String {
        if word.trim().is_empty() {
            return word.to_string();
        }

        let lower = word.to_lowercase();
        let candidate = self.inner.correct(&lower);
        if candidate.is_empty() || candidate.to_lowercase() == lower {
            return word.to_string();
        }

        if word.chars().next().is_some_and(char::is_uppercase) {
            capitalize(&candidate)
        } else {
            candidate
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(word: &str) -> String {
        match word {
            "helo" => "hello".to_string(),
            "wrld" => "world".to_string(),
            "hi" => "HI".to_string(),
            other => other.to_string(),
        }
    }

    #[test]
    fn passthrough_keeps_word() {
        assert_eq!(Passthrough.correct("HLEO"), "HLEO");
    }

    #[test]
    fn capitalizes_when_signed_upper_case() {
        let corrector = CasePreserving::new(dictionary);
        assert_eq!(corrector.correct("HELO"), "Hello");
        assert_eq!(corrector.correct("Wrld"), "World");
    }

    #[test]
    fn lower_case_word_gets_plain_suggestion() {
        let corrector = CasePreserving::new(dictionary);
        assert_eq!(corrector.correct("helo"), "hello");
    }

    #[test]
    fn same_word_ignoring_case_is_left_alone() {
        let corrector = CasePreserving::new(dictionary);
        assert_eq!(corrector.correct("HI"), "HI");
        assert_eq!(corrector.correct("CAT"), "CAT");
    }

    #[test]
    fn blank_word_skips_dictionary() {
        let corrector = CasePreserving::new(|_: &str| -> String { panic!("consulted") });
        assert_eq!(corrector.correct(""), "");
        assert_eq!(corrector.correct("  "), "  ");
    }
}
