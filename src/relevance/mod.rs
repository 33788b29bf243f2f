//! Text relevance: a BM25 / TF-IDF similarity signal kept apart from the overall score

pub mod analyzer;
pub mod index;
pub mod scorer;

pub use analyzer::Analyzer;
pub use index::{Similarity, SingleDocumentIndex, TextIndexError};
pub use scorer::{candidate_corpus, job_corpus, TextRelevanceScorer};

impl From<TextIndexError> for crate::error::MatchingError {
    fn from(err: TextIndexError) -> Self {
        crate::error::MatchingError::TextIndex(err.to_string())
    }
}
