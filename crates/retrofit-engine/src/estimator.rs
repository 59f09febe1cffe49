//! Alignment vector estimator: average offset per pattern.

use std::collections::BTreeMap;

use retrofit_core::errors::RetrofitError;
use retrofit_core::vector::add_difference;
use retrofit_lexicon::{AlignmentIndex, VectorStore};
use tracing::debug;

/// Resolves a word to its vector.
pub trait VectorLookup {
    fn lookup(&self, word: &str) -> Option<&[f64]>;
}

impl VectorLookup for VectorStore {
    fn lookup(&self, word: &str) -> Option<&[f64]> {
        self.get(word)
    }
}

/// Mean `target - source` offset per pattern.
///
/// Patterns with no pair resolvable on both sides are absent, not zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentOffsets {
    offsets: BTreeMap<String, Vec<f64>>,
    omitted: Vec<String>,
}

impl AlignmentOffsets {
    pub fn get(&self, pattern: &str) -> Option<&[f64]> {
        self.offsets.get(pattern).map(Vec::as_slice)
    }

    /// Offset for `pattern`, needed while updating `word`.
    pub fn require(&self, pattern: &str, word: &str) -> Result<&[f64], RetrofitError> {
        self.get(pattern).ok_or_else(|| RetrofitError::MissingAlignmentOffset {
            pattern: pattern.to_string(),
            word: word.to_string(),
        })
    }

    /// Patterns that received an estimate.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Patterns left without an estimate, in label order.
    pub fn omitted(&self) -> &[String] {
        &self.omitted
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.offsets.iter().map(|(p, v)| (p.as_str(), v.as_slice()))
    }
}

/// Estimate each pattern's average offset over pairs whose source and
/// target both resolve through `lookup`.
pub fn compute_averages(index: &AlignmentIndex, lookup: &dyn VectorLookup) -> AlignmentOffsets {
    let mut result = AlignmentOffsets::default();

    for (pattern, pairs) in index.patterns() {
        let mut sum: Option<Vec<f64>> = None;
        let mut count = 0usize;
        for pair in pairs {
            let (Some(source), Some(target)) = (lookup.lookup(&pair.source), lookup.lookup(&pair.target))
            else {
                continue;
            };
            let acc = sum.get_or_insert_with(|| vec![0.0; source.len()]);
            add_difference(acc, target, source);
            count += 1;
        }

        match sum {
            Some(mut acc) => {
                let n = count as f64;
                for x in acc.iter_mut() {
                    *x /= n;
                }
                result.offsets.insert(pattern.to_string(), acc);
            }
            None => result.omitted.push(pattern.to_string()),
        }
    }

    debug!(
        estimated = result.offsets.len(),
        omitted = result.omitted.len(),
        "average alignment offsets computed"
    );
    result
}
