//! # retrofit-engine
//!
//! Retrofitting: iteratively pulls each in-scope word vector toward its
//! anchor (original) value, its lexicon neighbors, and the positions its
//! morphological counterparts imply through each pattern's average offset.
//!
//! Updates are in place (Gauss-Seidel): words are visited in lexicographic
//! order and later words read vectors already updated earlier in the same
//! iteration. Parallelizing the loop would change the results.

pub mod engine;
pub mod estimator;
pub mod source;

pub use engine::{retrofit, RetrofitEngine, RetrofitPlan, RetrofitReport};
pub use estimator::{compute_averages, AlignmentOffsets, VectorLookup};
pub use source::{Direction, Evidence, KnowledgeSource, ScopeContext};
