//! Knowledge sources and the evidence they contribute.
//!
//! Lexicon and alignment index feed one update rule. Each source names the
//! words it covers and, per word, the evidence items that pull on it. A
//! missing source simply contributes nothing.

use std::collections::BTreeSet;

use retrofit_core::errors::RetrofitError;
use retrofit_lexicon::{AlignmentIndex, AlignmentPair, Lexicon, VectorStore};

/// How a word relates to its counterpart in an alignment pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The word is the source: target `W[counterpart] - offset`.
    Source,
    /// The word is the target: target `W[counterpart] + offset`.
    Target,
}

impl Direction {
    /// Role of `word` in `pair`.
    pub fn of(word: &str, pattern: &str, pair: &AlignmentPair) -> Result<Self, RetrofitError> {
        if pair.source == word {
            Ok(Self::Source)
        } else if pair.target == word {
            Ok(Self::Target)
        } else {
            Err(RetrofitError::PairIntegrity {
                word: word.to_string(),
                pattern: pattern.to_string(),
                source_form: pair.source.clone(),
                target_form: pair.target.clone(),
            })
        }
    }
}

/// One piece of evidence for a word, resolved to store slots.
#[derive(Debug, Clone, PartialEq)]
pub enum Evidence {
    /// A lexicon neighbor's current vector.
    Neighbor { slot: usize },
    /// The counterpart's current vector shifted by a pattern offset.
    Aligned {
        pattern: String,
        counterpart: usize,
        direction: Direction,
    },
}

/// What a source may consult while gathering evidence.
pub struct ScopeContext<'a> {
    pub anchor: &'a VectorStore,
    pub loop_vocabulary: &'a BTreeSet<String>,
}

/// A source of relational evidence.
pub trait KnowledgeSource {
    fn name(&self) -> &'static str;

    /// Words this source can say something about.
    fn scope(&self) -> BTreeSet<&str>;

    /// Append the evidence for `word` to `out`.
    fn gather(&self, word: &str, ctx: &ScopeContext<'_>, out: &mut Vec<Evidence>) -> Result<(), RetrofitError>;
}

impl KnowledgeSource for Lexicon {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn scope(&self) -> BTreeSet<&str> {
        self.heads().collect()
    }

    /// Declared neighbors present in the anchor vocabulary.
    fn gather(&self, word: &str, ctx: &ScopeContext<'_>, out: &mut Vec<Evidence>) -> Result<(), RetrofitError> {
        for neighbor in self.neighbors_of(word, ctx.anchor) {
            let slot = ctx
                .anchor
                .slot(neighbor)
                .ok_or_else(|| RetrofitError::MissingVector {
                    word: neighbor.to_string(),
                })?;
            out.push(Evidence::Neighbor { slot });
        }
        Ok(())
    }
}

impl KnowledgeSource for AlignmentIndex {
    fn name(&self) -> &'static str {
        "alignment"
    }

    fn scope(&self) -> BTreeSet<&str> {
        self.forms()
    }

    /// Non-identity pairs containing `word` whose both sides are in the
    /// loop vocabulary.
    fn gather(&self, word: &str, ctx: &ScopeContext<'_>, out: &mut Vec<Evidence>) -> Result<(), RetrofitError> {
        for (pattern, pair) in self.pairs_containing(word) {
            if !(ctx.loop_vocabulary.contains(&pair.source) && ctx.loop_vocabulary.contains(&pair.target)) {
                continue;
            }
            let direction = Direction::of(word, pattern, pair)?;
            let counterpart_word = match direction {
                Direction::Source => &pair.target,
                Direction::Target => &pair.source,
            };
            let counterpart = ctx
                .anchor
                .slot(counterpart_word)
                .ok_or_else(|| RetrofitError::MissingVector {
                    word: counterpart_word.clone(),
                })?;
            out.push(Evidence::Aligned {
                pattern: pattern.to_string(),
                counterpart,
                direction,
            });
        }
        Ok(())
    }
}
