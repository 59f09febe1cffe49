//! The iterative in-place update.
//!
//! For every word `w` in the loop vocabulary with `k > 0` pieces of
//! evidence:
//!
//! ```text
//! W[w] = (k * A[w] + Σ neighbor W[n] + Σ aligned (W[c] ∓ offset[p])) / 2k
//! ```
//!
//! `A` is the anchor store (never modified), `W` the working store. Offsets
//! are re-estimated from `A` at the start of every iteration.

use std::collections::BTreeSet;

use retrofit_core::errors::RetrofitError;
use retrofit_core::vector::{add_assign, add_scaled};
use retrofit_lexicon::{AlignmentIndex, Lexicon, VectorStore};
use tracing::{debug, info, instrument};

use crate::estimator::{compute_averages, AlignmentOffsets};
use crate::source::{Direction, Evidence, KnowledgeSource, ScopeContext};

/// Evidence for one word of the loop vocabulary.
#[derive(Debug, Clone)]
struct WordPlan {
    slot: usize,
    evidence: Vec<Evidence>,
}

/// Per-run schedule: loop vocabulary in visit order with resolved evidence.
///
/// Evidence depends only on the anchor vocabulary and the knowledge
/// sources, so it is gathered once and replayed every iteration.
#[derive(Debug, Clone)]
pub struct RetrofitPlan {
    words: Vec<WordPlan>,
}

impl RetrofitPlan {
    /// Size of the loop vocabulary.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words that will actually move.
    pub fn with_evidence(&self) -> usize {
        self.words.iter().filter(|w| !w.evidence.is_empty()).count()
    }

    /// Evidence count for the word at `slot`, if it is in the loop vocabulary.
    pub fn evidence_count(&self, slot: usize) -> Option<usize> {
        self.words.iter().find(|w| w.slot == slot).map(|w| w.evidence.len())
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrofitReport {
    pub iterations: usize,
    pub loop_vocabulary: usize,
    /// Words updated in each iteration.
    pub updated: usize,
    /// Loop-vocabulary words left unchanged for lack of evidence.
    pub skipped: usize,
    /// Patterns with an average offset (0 without an alignment index).
    pub patterns_estimated: usize,
    /// Patterns with no usable pair.
    pub patterns_omitted: usize,
}

/// Retrofits vectors against a lexicon, an alignment index, or both.
pub struct RetrofitEngine<'a> {
    lexicon: Option<&'a Lexicon>,
    alignment: Option<&'a AlignmentIndex>,
}

impl<'a> RetrofitEngine<'a> {
    /// At least one knowledge source is required.
    pub fn new(
        lexicon: Option<&'a Lexicon>,
        alignment: Option<&'a AlignmentIndex>,
    ) -> Result<Self, RetrofitError> {
        if lexicon.is_none() && alignment.is_none() {
            return Err(RetrofitError::NoKnowledgeSource);
        }
        Ok(Self { lexicon, alignment })
    }

    fn sources(&self) -> Vec<&dyn KnowledgeSource> {
        let mut sources: Vec<&dyn KnowledgeSource> = Vec::with_capacity(2);
        if let Some(lexicon) = self.lexicon {
            sources.push(lexicon);
        }
        if let Some(alignment) = self.alignment {
            sources.push(alignment);
        }
        sources
    }

    /// Anchor words covered by any source, in visit (lexicographic) order.
    pub fn loop_vocabulary(&self, anchor: &VectorStore) -> BTreeSet<String> {
        let mut covered = BTreeSet::new();
        for source in self.sources() {
            let scope = source.scope();
            debug!(source = source.name(), words = scope.len(), "source scope");
            covered.extend(scope);
        }
        covered
            .into_iter()
            .filter(|w| anchor.contains(w))
            .map(str::to_string)
            .collect()
    }

    /// Resolve the loop vocabulary and every word's evidence.
    pub fn plan(&self, anchor: &VectorStore) -> Result<RetrofitPlan, RetrofitError> {
        let loop_vocabulary = self.loop_vocabulary(anchor);
        let ctx = ScopeContext {
            anchor,
            loop_vocabulary: &loop_vocabulary,
        };
        let sources = self.sources();

        let mut words = Vec::with_capacity(loop_vocabulary.len());
        for word in &loop_vocabulary {
            let slot = anchor
                .slot(word)
                .ok_or_else(|| RetrofitError::MissingVector { word: word.clone() })?;
            let mut evidence = Vec::new();
            for source in &sources {
                source.gather(word, &ctx, &mut evidence)?;
            }
            words.push(WordPlan { slot, evidence });
        }
        Ok(RetrofitPlan { words })
    }

    /// Run `iterations` update sweeps and return the working store.
    ///
    /// `iterations == 0` returns an exact copy of `anchor`.
    #[instrument(skip_all, fields(iterations = iterations, vocabulary = anchor.len()))]
    pub fn retrofit(
        &self,
        anchor: &VectorStore,
        iterations: usize,
    ) -> Result<(VectorStore, RetrofitReport), RetrofitError> {
        let plan = self.plan(anchor)?;
        let mut working = anchor.clone();

        let mut report = RetrofitReport {
            iterations,
            loop_vocabulary: plan.len(),
            updated: plan.with_evidence(),
            skipped: plan.len() - plan.with_evidence(),
            ..Default::default()
        };
        info!(
            loop_vocabulary = report.loop_vocabulary,
            with_evidence = report.updated,
            "retrofitting plan ready"
        );

        let mut acc = vec![0.0; anchor.dimension()];
        for iteration in 0..iterations {
            let offsets = match self.alignment {
                Some(index) => compute_averages(index, anchor),
                None => AlignmentOffsets::default(),
            };
            report.patterns_estimated = offsets.len();
            report.patterns_omitted = offsets.omitted().len();

            sweep(anchor, &mut working, &plan, &offsets, &mut acc)?;
            info!(
                iteration = iteration + 1,
                total = iterations,
                updated = report.updated,
                skipped = report.skipped,
                "iteration complete"
            );
        }

        Ok((working, report))
    }
}

/// One Gauss-Seidel pass over the plan, in plan order.
fn sweep(
    anchor: &VectorStore,
    working: &mut VectorStore,
    plan: &RetrofitPlan,
    offsets: &AlignmentOffsets,
    acc: &mut [f64],
) -> Result<(), RetrofitError> {
    for word in &plan.words {
        let evidence = word.evidence.len();
        if evidence == 0 {
            continue;
        }

        acc.fill(0.0);
        add_scaled(acc, anchor.row(word.slot), evidence as f64);

        for item in &word.evidence {
            match item {
                Evidence::Neighbor { slot } => add_assign(acc, working.row(*slot)),
                Evidence::Aligned {
                    pattern,
                    counterpart,
                    direction,
                } => {
                    let offset = offsets.require(pattern, anchor.word_at(word.slot))?;
                    let counterpart = working.row(*counterpart);
                    for ((a, c), o) in acc.iter_mut().zip(counterpart).zip(offset) {
                        *a += match direction {
                            Direction::Source => c - o,
                            Direction::Target => c + o,
                        };
                    }
                }
            }
        }

        let divisor = (2 * evidence) as f64;
        for (w, a) in working.row_mut(word.slot).iter_mut().zip(acc.iter()) {
            *w = a / divisor;
        }
    }
    debug!(words = plan.words.len(), "sweep finished");
    Ok(())
}

/// Retrofit `anchor` with whichever sources are given.
pub fn retrofit(
    anchor: &VectorStore,
    lexicon: Option<&Lexicon>,
    alignment: Option<&AlignmentIndex>,
    iterations: usize,
) -> Result<(VectorStore, RetrofitReport), RetrofitError> {
    RetrofitEngine::new(lexicon, alignment)?.retrofit(anchor, iterations)
}
