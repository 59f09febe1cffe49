//! Morphological alignment index.
//!
//! Pattern label → set of directed (source, target) form pairs. Every forward
//! pattern `P` built from relation data has a reverse pattern `rP` holding
//! the same pairs swapped. Patterns and pairs are kept ordered so that every
//! traversal (and therefore every floating-point sum over pairs) is
//! reproducible.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

use retrofit_core::constants::REVERSE_PATTERN_PREFIX;
use retrofit_core::errors::LoadError;
use retrofit_core::normalize_word;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catvar::MorphRelation;
use crate::io::{open_reader, OutputSink};

/// A directed pair: `source` is the base form, `target` the derived form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AlignmentPair {
    pub source: String,
    pub target: String,
}

impl AlignmentPair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.source == word || self.target == word
    }

    /// A self-mapping carries no signal.
    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.target.clone(), self.source.clone())
    }
}

/// Name of the reverse direction of a pattern.
pub fn reverse_pattern(pattern: &str) -> String {
    format!("{REVERSE_PATTERN_PREFIX}{pattern}")
}

/// Pattern label → pairs, plus a form → (pattern, pair) lookup.
#[derive(Debug, Clone, Default)]
pub struct AlignmentIndex {
    patterns: BTreeMap<String, BTreeSet<AlignmentPair>>,
    // Only non-identity pairs are indexed by form.
    by_form: FxHashMap<String, BTreeSet<(String, AlignmentPair)>>,
}

/// On-disk shapes accepted by [`AlignmentIndex::load`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IndexDocument {
    /// `{ "pattern": [[source, target], ...], ... }`
    ByPattern(BTreeMap<String, Vec<(String, String)>>),
    /// `[[source, target, pattern], ...]`
    Flat(Vec<(String, String, String)>),
}

impl AlignmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from morph relations: for each surface form `f` of a relation,
    /// `(base, f)` goes under the pattern and `(f, base)` under its reverse.
    /// Forms are normalized, so `Dogs` and `dogs` are one form.
    ///
    /// Both labels are registered even for a relation without forms.
    pub fn build<'a, I>(relations: I) -> Self
    where
        I: IntoIterator<Item = &'a MorphRelation>,
    {
        let mut index = Self::new();
        for relation in relations {
            let reverse = reverse_pattern(&relation.pattern);
            index.patterns.entry(relation.pattern.clone()).or_default();
            index.patterns.entry(reverse.clone()).or_default();
            for form in &relation.forms {
                let pair = AlignmentPair::new(relation.base.as_str(), form.as_str());
                index.insert(&reverse, pair.reversed());
                index.insert(&relation.pattern, pair);
            }
        }
        index
    }

    /// Add one pair under a pattern, normalizing both forms. Returns `false`
    /// if it was already there.
    pub fn insert(&mut self, pattern: &str, pair: AlignmentPair) -> bool {
        let pair = AlignmentPair::new(normalize_word(&pair.source), normalize_word(&pair.target));
        let set = self.patterns.entry(pattern.to_string()).or_default();
        if !set.insert(pair.clone()) {
            return false;
        }
        if !pair.is_identity() {
            for form in [&pair.source, &pair.target] {
                self.by_form
                    .entry(form.clone())
                    .or_default()
                    .insert((pattern.to_string(), pair.clone()));
            }
        }
        true
    }

    /// Number of pattern labels (including reverse labels).
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Total pairs across all patterns.
    pub fn pair_count(&self) -> usize {
        self.patterns.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pair_count() == 0
    }

    /// `(pattern, pairs)` in label order.
    pub fn patterns(&self) -> impl Iterator<Item = (&str, &BTreeSet<AlignmentPair>)> {
        self.patterns.iter().map(|(p, pairs)| (p.as_str(), pairs))
    }

    pub fn pairs(&self, pattern: &str) -> Option<&BTreeSet<AlignmentPair>> {
        self.patterns.get(pattern)
    }

    /// Every form appearing on either side of any pair.
    pub fn forms(&self) -> BTreeSet<&str> {
        self.patterns
            .values()
            .flatten()
            .flat_map(|pair| [pair.source.as_str(), pair.target.as_str()])
            .collect()
    }

    /// Patterns with at least one non-identity pair containing `word`.
    pub fn patterns_containing(&self, word: &str) -> BTreeSet<&str> {
        self.by_form
            .get(word)
            .map(|entries| entries.iter().map(|(p, _)| p.as_str()).collect())
            .unwrap_or_default()
    }

    /// Pairs under `pattern` with `word` on either side.
    pub fn pairs_of(&self, pattern: &str, word: &str) -> BTreeSet<&AlignmentPair> {
        self.patterns
            .get(pattern)
            .map(|pairs| pairs.iter().filter(|pair| pair.contains(word)).collect())
            .unwrap_or_default()
    }

    /// All non-identity `(pattern, pair)` entries containing `word`, ordered
    /// by pattern then pair.
    pub fn pairs_containing(&self, word: &str) -> impl Iterator<Item = (&str, &AlignmentPair)> {
        self.by_form
            .get(word)
            .into_iter()
            .flatten()
            .map(|(pattern, pair)| (pattern.as_str(), pair))
    }

    /// Read an index from JSON.
    ///
    /// Accepts the object shape written by [`save`](Self::save) or a flat
    /// list of `[source, target, pattern]` triples.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let reader = open_reader(path)?;
        let document: IndexDocument =
            serde_json::from_reader(reader).map_err(|e| LoadError::Format {
                path: path.to_path_buf(),
                format: "alignment index",
                message: e.to_string(),
            })?;

        let mut index = Self::new();
        match document {
            IndexDocument::ByPattern(patterns) => {
                for (pattern, pairs) in patterns {
                    index.patterns.entry(pattern.clone()).or_default();
                    for (source, target) in pairs {
                        index.insert(&pattern, AlignmentPair::new(source, target));
                    }
                }
            }
            IndexDocument::Flat(triples) => {
                for (source, target, pattern) in triples {
                    index.insert(&pattern, AlignmentPair::new(source, target));
                }
            }
        }
        info!(
            path = %path.display(),
            patterns = index.pattern_count(),
            pairs = index.pair_count(),
            "alignment index read"
        );
        Ok(index)
    }

    /// Write the object shape, patterns and pairs sorted.
    pub fn save(&self, path: &Path) -> Result<(), LoadError> {
        let document: BTreeMap<&str, Vec<(&str, &str)>> = self
            .patterns
            .iter()
            .map(|(pattern, pairs)| {
                let pairs = pairs
                    .iter()
                    .map(|p| (p.source.as_str(), p.target.as_str()))
                    .collect();
                (pattern.as_str(), pairs)
            })
            .collect();

        let mut sink = OutputSink::create(path)?;
        serde_json::to_writer(&mut sink, &document).map_err(|e| LoadError::Format {
            path: path.to_path_buf(),
            format: "alignment index",
            message: e.to_string(),
        })?;
        sink.write_all(b"\n").map_err(|e| LoadError::io(path, e))?;
        sink.finish().map_err(|e| LoadError::io(path, e))?;
        info!(path = %path.display(), patterns = self.pattern_count(), pairs = self.pair_count(), "alignment index written");
        Ok(())
    }
}
