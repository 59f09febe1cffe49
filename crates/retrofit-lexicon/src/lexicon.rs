//! Relatedness lexicon (e.g. PPDB or WordNet synonym lists).

use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::Path;

use retrofit_core::errors::LoadError;
use retrofit_core::normalize_word;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::io::{open_reader, read_line_lossy};
use crate::vocabulary::Vocabulary;

/// Head word → declared related words.
///
/// Stored directed: only the head's own line defines its neighbors.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: FxHashMap<String, BTreeSet<String>>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the neighbors of `head`, replacing any earlier entry.
    /// All words are normalized.
    pub fn insert<I, S>(&mut self, head: &str, neighbors: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let neighbors = neighbors
            .into_iter()
            .map(|n| normalize_word(n.as_ref()))
            .collect();
        self.entries.insert(normalize_word(head), neighbors);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_head(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// All head words (unordered).
    pub fn heads(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Declared neighbors of `word` that are in `vocabulary`, in
    /// lexicographic order. Empty if `word` has no entry.
    pub fn neighbors_of<'a>(&'a self, word: &str, vocabulary: &dyn Vocabulary) -> Vec<&'a str> {
        self.entries
            .get(word)
            .map(|neighbors| {
                neighbors
                    .iter()
                    .map(String::as_str)
                    .filter(|n| vocabulary.contains_word(n))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let mut reader = open_reader(path)?;
        let lexicon = Self::read(reader.as_mut()).map_err(|e| LoadError::io(path, e))?;
        info!(path = %path.display(), heads = lexicon.len(), "lexicon read");
        Ok(lexicon)
    }

    /// Parse `head related1 related2 ...` lines. Blank lines are ignored.
    pub fn read(reader: &mut dyn BufRead) -> std::io::Result<Self> {
        let mut lexicon = Self::new();
        let (mut raw, mut line) = (Vec::new(), String::new());
        while read_line_lossy(reader, &mut raw, &mut line)? {
            let mut tokens = line.split_whitespace();
            if let Some(head) = tokens.next() {
                lexicon.insert(head, tokens);
            }
        }
        Ok(lexicon)
    }
}
