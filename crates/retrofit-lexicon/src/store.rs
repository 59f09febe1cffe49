//! VectorStore: word → vector arena.
//!
//! Vectors live in one contiguous `Vec<f64>` of `len × dimension` components,
//! addressed by slot. Slots follow insertion order, which is also the order
//! vectors are written back out.

use std::io::{BufRead, Write};
use std::path::Path;

use retrofit_core::constants::OUTPUT_PRECISION;
use retrofit_core::errors::{LoadError, RecordError, RetrofitError};
use retrofit_core::normalize_word;
use retrofit_core::vector::normalize_in_place;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::io::{open_reader, read_line_lossy, OutputSink};
use crate::vocabulary::Vocabulary;

/// Word vectors sharing one dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorStore {
    dimension: usize,
    words: Vec<String>,
    slots: FxHashMap<String, usize>,
    data: Vec<f64>,
}

/// Parsing options for vector files.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// L2-normalize each vector (with epsilon) as it is loaded.
    pub normalize: bool,
    /// Lines hold a multi-token word followed by exactly this many
    /// components; the word tokens are joined with `_`.
    pub phrase_dimension: Option<usize>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            phrase_dimension: None,
        }
    }
}

/// Outcome of a load: how many records made it in, and which were skipped.
#[derive(Debug, Default, Clone)]
pub struct LoadReport {
    pub accepted: usize,
    pub skipped: Vec<RecordError>,
    /// Records whose normalized word was already present (later one wins).
    pub duplicates: usize,
    /// `(count, dimension)` from a word2vec-style `N D` first line.
    pub header: Option<(usize, usize)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl VectorStore {
    /// Create an empty store for vectors of `dimension` components.
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension,
            words: Vec::new(),
            slots: FxHashMap::default(),
            data: Vec::new(),
        }
    }

    /// Build a store from `(word, vector)` entries, taking the dimension from
    /// the first entry. Words are stored as given.
    pub fn from_entries<W, I>(entries: I) -> Result<Self, RetrofitError>
    where
        W: Into<String>,
        I: IntoIterator<Item = (W, Vec<f64>)>,
    {
        let mut iter = entries.into_iter().peekable();
        let dimension = iter.peek().map(|(_, v)| v.len()).unwrap_or(0);
        let mut store = Self::with_dimension(dimension);
        for (word, vector) in iter {
            store.insert(word, &vector)?;
        }
        Ok(store)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.slots.contains_key(word)
    }

    /// Slot index of a word.
    pub fn slot(&self, word: &str) -> Option<usize> {
        self.slots.get(word).copied()
    }

    /// Word stored at a slot.
    pub fn word_at(&self, slot: usize) -> &str {
        &self.words[slot]
    }

    /// Vector stored at a slot.
    pub fn row(&self, slot: usize) -> &[f64] {
        let start = slot * self.dimension;
        &self.data[start..start + self.dimension]
    }

    /// Mutable vector stored at a slot.
    pub fn row_mut(&mut self, slot: usize) -> &mut [f64] {
        let start = slot * self.dimension;
        &mut self.data[start..start + self.dimension]
    }

    pub fn get(&self, word: &str) -> Option<&[f64]> {
        self.slot(word).map(|slot| self.row(slot))
    }

    /// Insert or replace a vector. Returns `true` if the word was new.
    ///
    /// A replaced word keeps its original slot (and output position).
    pub fn insert(&mut self, word: impl Into<String>, vector: &[f64]) -> Result<bool, RetrofitError> {
        if vector.len() != self.dimension {
            return Err(RetrofitError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        let word = word.into();
        if let Some(slot) = self.slot(&word) {
            self.row_mut(slot).copy_from_slice(vector);
            return Ok(false);
        }
        self.slots.insert(word.clone(), self.words.len());
        self.words.push(word);
        self.data.extend_from_slice(vector);
        Ok(true)
    }

    /// Words in slot order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// `(word, vector)` in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.words
            .iter()
            .enumerate()
            .map(move |(slot, w)| (w.as_str(), self.row(slot)))
    }

    /// Load a vector file (plain or `.gz`).
    ///
    /// Malformed records are logged and skipped. A file that yields no
    /// vectors at all is an error.
    pub fn load(path: &Path, options: &LoadOptions) -> Result<(Self, LoadReport), LoadError> {
        let mut reader = open_reader(path)?;
        let (store, report) = Self::read(reader.as_mut(), options).map_err(|e| LoadError::io(path, e))?;

        if let Some((count, dimension)) = report.header {
            if dimension != store.dimension() || count != report.accepted {
                warn!(
                    path = %path.display(),
                    declared_count = count,
                    declared_dimension = dimension,
                    "vector file header disagrees with its records"
                );
            }
        }
        for skipped in &report.skipped {
            warn!(path = %path.display(), line = skipped.line, reason = %skipped.reason, "skipping vector record");
        }
        if store.is_empty() {
            return Err(LoadError::EmptyInput {
                path: path.to_path_buf(),
            });
        }
        info!(
            path = %path.display(),
            vectors = store.len(),
            dimension = store.dimension(),
            skipped = report.skipped.len(),
            "vectors read"
        );
        Ok((store, report))
    }

    /// Parse vector records from a reader.
    ///
    /// A first line of exactly two unsigned integers is a `count dimension`
    /// header and is not a record. After that, the first well-formed record
    /// fixes the dimension. Only I/O failures are returned as errors.
    pub fn read(reader: &mut dyn BufRead, options: &LoadOptions) -> std::io::Result<(Self, LoadReport)> {
        let mut store: Option<Self> = options.phrase_dimension.map(Self::with_dimension);
        let mut report = LoadReport::default();
        let (mut raw, mut line) = (Vec::new(), String::new());
        let mut components = Vec::new();
        let mut line_no = 0;

        while read_line_lossy(reader, &mut raw, &mut line)? {
            line_no += 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            if report.accepted == 0 && report.skipped.is_empty() && report.header.is_none() {
                if let Some(header) = parse_header(&tokens) {
                    debug!(line = line_no, count = header.0, dimension = header.1, "skipping header line");
                    report.header = Some(header);
                    continue;
                }
            }

            let expected = store.as_ref().map(|s| s.dimension);
            let (word, values) = match split_record(&tokens, options.phrase_dimension, expected) {
                Ok(parts) => parts,
                Err(reason) => {
                    report.skipped.push(RecordError { line: line_no, reason });
                    continue;
                }
            };

            components.clear();
            if let Err(reason) = parse_components(values, &mut components) {
                report.skipped.push(RecordError { line: line_no, reason });
                continue;
            }
            if options.normalize {
                normalize_in_place(&mut components);
            }

            let word = normalize_word(&word);
            let store = store.get_or_insert_with(|| Self::with_dimension(components.len()));
            match store.insert(word.as_str(), &components) {
                Ok(true) => {}
                Ok(false) => {
                    debug!(word = %word, line = line_no, "duplicate vector replaces earlier record");
                    report.duplicates += 1;
                }
                Err(e) => {
                    report.skipped.push(RecordError {
                        line: line_no,
                        reason: e.to_string(),
                    });
                    continue;
                }
            }
            report.accepted += 1;
        }

        Ok((store.unwrap_or_else(|| Self::with_dimension(0)), report))
    }

    /// Write all vectors, one `word c1 c2 ...` line each, components to 4
    /// decimal places. `.gz` paths are compressed.
    pub fn write(&self, path: &Path) -> Result<(), LoadError> {
        let mut sink = OutputSink::create(path)?;
        self.write_to(&mut sink).map_err(|e| LoadError::io(path, e))?;
        sink.finish().map_err(|e| LoadError::io(path, e))?;
        info!(path = %path.display(), vectors = self.len(), "vectors written");
        Ok(())
    }

    pub fn write_to(&self, out: &mut dyn Write) -> std::io::Result<()> {
        for (word, vector) in self.iter() {
            out.write_all(word.as_bytes())?;
            for value in vector {
                write!(out, " {:.*}", OUTPUT_PRECISION, value)?;
            }
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl Vocabulary for VectorStore {
    fn contains_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}

/// Split a tokenized line into the raw word and its component tokens.
fn split_record<'a>(
    tokens: &'a [&'a str],
    phrase_dimension: Option<usize>,
    expected: Option<usize>,
) -> Result<(String, &'a [&'a str]), String> {
    match phrase_dimension {
        Some(dim) => {
            if tokens.len() <= dim {
                return Err(format!(
                    "expected a word and {dim} components, found {} tokens",
                    tokens.len()
                ));
            }
            let split = tokens.len() - dim;
            Ok((tokens[..split].join("_"), &tokens[split..]))
        }
        None => {
            let values = &tokens[1..];
            if values.is_empty() {
                return Err("record has no components".to_string());
            }
            if let Some(dim) = expected {
                if values.len() != dim {
                    return Err(format!(
                        "expected {dim} components, found {}",
                        values.len()
                    ));
                }
            }
            Ok((tokens[0].to_string(), values))
        }
    }
}

/// `N D` header: two unsigned integers and nothing else.
fn parse_header(tokens: &[&str]) -> Option<(usize, usize)> {
    match tokens {
        [count, dimension] => Some((count.parse().ok()?, dimension.parse().ok()?)),
        _ => None,
    }
}

fn parse_components(values: &[&str], out: &mut Vec<f64>) -> Result<(), String> {
    for token in values {
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() => out.push(v),
            Ok(_) => return Err(format!("non-finite component '{token}'")),
            Err(_) => return Err(format!("invalid component '{token}'")),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_str(text: &str, options: &LoadOptions) -> (VectorStore, LoadReport) {
        let mut reader: &[u8] = text.as_bytes();
        VectorStore::read(&mut reader, options).unwrap()
    }

    fn raw() -> LoadOptions {
        LoadOptions {
            normalize: false,
            ..Default::default()
        }
    }

    #[test]
    fn reads_words_and_components() {
        let (store, report) = read_str("Dog 1 0\ncat 0.5 -0.5\n", &raw());
        assert!(report.is_clean());
        assert_eq!(store.dimension(), 2);
        assert_eq!(store.get("dog"), Some(&[1.0, 0.0][..]));
        assert_eq!(store.get("cat"), Some(&[0.5, -0.5][..]));
        assert_eq!(store.words().collect::<Vec<_>>(), vec!["dog", "cat"]);
    }

    #[test]
    fn malformed_records_are_skipped_not_fatal() {
        let text = "dog 1 0\nbad 1 zero\nshort 1\nlonely\n\ncat 0 1\nnan nan 1\n";
        let (store, report) = read_str(text, &raw());
        assert_eq!(store.len(), 2);
        assert_eq!(report.accepted, 2);
        let lines: Vec<usize> = report.skipped.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 7]);
        assert!(report.skipped[0].reason.contains("zero"));
    }

    #[test]
    fn loaded_vectors_are_normalized_with_epsilon() {
        let (store, _) = read_str("dog 3 4\n", &LoadOptions::default());
        let v = store.get("dog").unwrap();
        let norm = (25.0f64 + 1e-6).sqrt();
        assert!((v[0] - 3.0 / norm).abs() < 1e-12);
        assert!((v[1] - 4.0 / norm).abs() < 1e-12);
    }

    #[test]
    fn keys_are_normalized() {
        let (store, report) = read_str("1999 1 0\n2000 0 1\n!!! 1 1\n", &raw());
        assert_eq!(store.len(), 2);
        assert_eq!(report.duplicates, 1);
        assert_eq!(store.get("---num---"), Some(&[0.0, 1.0][..]));
        assert!(store.contains("---punc---"));
    }

    #[test]
    fn phrase_mode_joins_leading_tokens() {
        let options = LoadOptions {
            normalize: false,
            phrase_dimension: Some(2),
        };
        let (store, report) = read_str("New York 1 0\nparis 0 1\n2\n", &options);
        assert_eq!(store.get("new_york"), Some(&[1.0, 0.0][..]));
        assert!(store.contains("paris"));
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn word2vec_header_is_not_a_record() {
        let (store, report) = read_str("3 2\ndog 1 0\ndogs 0 1\ncat 1 1\n", &raw());
        assert_eq!(report.header, Some((3, 2)));
        assert!(report.is_clean());
        assert_eq!(store.dimension(), 2);
        assert_eq!(store.words().collect::<Vec<_>>(), vec!["dog", "dogs", "cat"]);
    }

    #[test]
    fn numeric_pair_after_first_record_is_a_record() {
        let (store, report) = read_str("dog 1\n3 2\n", &raw());
        assert_eq!(report.header, None);
        assert_eq!(store.get("---num---"), Some(&[2.0][..]));
    }

    #[test]
    fn insert_rejects_wrong_dimension() {
        let mut store = VectorStore::with_dimension(3);
        let err = store.insert("dog", &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, RetrofitError::DimensionMismatch { expected: 3, actual: 2 }));
    }

    #[test]
    fn replacement_keeps_slot() {
        let mut store = VectorStore::from_entries([("a", vec![1.0]), ("b", vec![2.0])]).unwrap();
        assert!(!store.insert("a", &[5.0]).unwrap());
        assert_eq!(store.slot("a"), Some(0));
        assert_eq!(store.row(0), &[5.0]);
    }

    #[test]
    fn writes_four_decimals() {
        let store = VectorStore::from_entries([("dog", vec![0.123456, -1.0])]).unwrap();
        let mut out = Vec::new();
        store.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "dog 0.1235 -1.0000\n");
    }
}
