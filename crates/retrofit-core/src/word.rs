//! Word normalization shared by every loader.
//!
//! Vector keys, lexicon entries and alignment forms all pass through
//! [`normalize_word`] before any lookup, so two spellings that collapse to
//! the same form are the same word everywhere in the pipeline.

use crate::constants::{NUM_TOKEN, PUNCT_TOKEN};

/// Normalize a raw token.
///
/// - any token containing an ASCII digit becomes [`NUM_TOKEN`]
/// - any token with no alphanumeric character becomes [`PUNCT_TOKEN`]
/// - everything else is lowercased
///
/// Idempotent: both sentinels are lowercase, digit-free and alphanumeric.
pub fn normalize_word(token: &str) -> String {
    if token.bytes().any(|b| b.is_ascii_digit()) {
        NUM_TOKEN.to_string()
    } else if !token.chars().any(char::is_alphanumeric) {
        PUNCT_TOKEN.to_string()
    } else {
        token.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_plain_words() {
        assert_eq!(normalize_word("Dogs"), "dogs");
        assert_eq!(normalize_word("ÉCOLE"), "école");
    }

    #[test]
    fn digits_collapse_to_num() {
        assert_eq!(normalize_word("1984"), NUM_TOKEN);
        assert_eq!(normalize_word("mp3"), NUM_TOKEN);
        assert_eq!(normalize_word("3.14"), NUM_TOKEN);
    }

    #[test]
    fn non_digit_numerics_are_not_numbers() {
        assert_eq!(normalize_word("½"), "½");
        assert_eq!(normalize_word("Ⅷ"), "ⅷ");
        assert_eq!(normalize_word("٣"), "٣");
    }

    #[test]
    fn symbols_collapse_to_punct() {
        assert_eq!(normalize_word("..."), PUNCT_TOKEN);
        assert_eq!(normalize_word("--"), PUNCT_TOKEN);
        assert_eq!(normalize_word(""), PUNCT_TOKEN);
    }

    #[test]
    fn sentinels_are_fixed_points() {
        assert_eq!(normalize_word(NUM_TOKEN), NUM_TOKEN);
        assert_eq!(normalize_word(PUNCT_TOKEN), PUNCT_TOKEN);
    }

    #[test]
    fn mixed_punctuation_keeps_word() {
        assert_eq!(normalize_word("Don't"), "don't");
    }
}
