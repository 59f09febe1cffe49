use std::collections::BTreeSet;

/// Anything that can answer "is this word known?".
pub trait Vocabulary {
    fn contains_word(&self, word: &str) -> bool;
}

impl Vocabulary for BTreeSet<String> {
    fn contains_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}
