pub mod corpus;
pub mod engine;
pub mod error;
pub mod idf;
pub mod rank;
pub mod sentences;
pub mod tokenizer;

use std::collections::BTreeSet;

pub use corpus::Corpus;
pub use engine::{Answer, QaEngine, RankConfig};
pub use error::{QaError, Result};
pub use idf::{compute_idfs, IdfTable};
pub use rank::{rank_files, rank_sentences, top_files, top_sentences, ScoredFile, ScoredSentence};

/// A normalized token: lower-cased, never punctuation, never a stopword.
pub type Term = String;

/// Terms of one text unit (document or sentence) in their original order.
pub type TermSequence = Vec<Term>;

/// Unique query terms. Ordered so that score accumulation is reproducible.
pub type Query = BTreeSet<Term>;
