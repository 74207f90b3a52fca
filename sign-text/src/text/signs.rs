use crate::classifier::ALPHABET;

/// One sign to show when spelling text back out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignToken {
    Letter(char),
    Number(char),
    Space,
}

/// Spell text as a sequence of fingerspelling signs
///
/// Text is upper-cased first. Characters without a sign (punctuation, '0',
/// non-ASCII letters) are dropped.
pub fn text_to_signs(text: &str) -> Vec<SignToken> {
    text.chars()
        .flat_map(char::to_uppercase)
        .filter_map(|c| match c {
            ' ' => Some(SignToken::Space),
            c if !ALPHABET.contains(&c) => None,
            c if c.is_ascii_digit() => Some(SignToken::Number(c)),
            c => Some(SignToken::Letter(c)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use SignToken::*;

    #[test]
    fn spells_words_and_spaces() {
        assert_eq!(
            text_to_signs("hi 5"),
            vec![Letter('H'), Letter('I'), Space, Number('5')]
        );
    }

    #[test]
    fn drops_unsupported_characters() {
        assert_eq!(text_to_signs("a0!é-b"), vec![Letter('A'), Letter('B')]);
        assert!(text_to_signs("").is_empty());
    }
}
