//! # retrofit-lexicon
//!
//! In-memory knowledge sources for retrofitting and their on-disk formats:
//! - [`VectorStore`]: arena of word vectors (plain or gzip text files)
//! - [`Lexicon`]: head word → related words
//! - [`AlignmentIndex`]: pattern label → directed (source, target) form pairs
//! - [`catvar`]: CatVar morph relations, the raw material of the index

pub mod alignment;
pub mod catvar;
pub mod io;
pub mod lexicon;
pub mod phrases;
pub mod store;
pub mod vocabulary;

pub use alignment::{AlignmentIndex, AlignmentPair};
pub use catvar::{MatchMode, MorphQuery, MorphRelation};
pub use lexicon::Lexicon;
pub use store::{LoadOptions, LoadReport, VectorStore};
pub use vocabulary::Vocabulary;
