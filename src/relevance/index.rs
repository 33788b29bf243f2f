//! In-memory tantivy index over a single document

use super::analyzer::Analyzer;
use tantivy::collector::TopDocs;
use tantivy::postings::Postings;
use tantivy::query::{BooleanQuery, Occur, Query, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions};
use tantivy::tokenizer::{TextAnalyzer, WhitespaceTokenizer};
use tantivy::{doc, DocSet, Index, IndexReader, IndexWriter, ReloadPolicy, Searcher, Term, TERMINATED};
use thiserror::Error;

const FIELD: &str = "body";
const TOKENIZER: &str = "analyzed";
// Smallest arena tantivy accepts for one indexing thread
const WRITER_MEMORY_BUDGET: usize = 15_000_000;

#[derive(Error, Debug)]
pub enum TextIndexError {
    #[error("document has no indexable terms")]
    EmptyDocument,

    #[error("query has no searchable terms")]
    EmptyQuery,

    #[error("index error: {0}")]
    Engine(#[from] tantivy::TantivyError),

    #[error("postings read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Term weighting used when scoring a query against the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Similarity {
    /// tantivy's Okapi BM25 (k1 = 1.2, b = 0.75)
    Bm25,
    /// Classic vector-space TF-IDF with length norm
    Classic,
}

/// One analyzed document, indexed and searched within a single scorer call
pub struct SingleDocumentIndex {
    analyzer: Analyzer,
    field: Field,
    reader: IndexReader,
    length: u32,
}

impl SingleDocumentIndex {
    pub fn build(analyzer: Analyzer, text: &str) -> Result<Self, TextIndexError> {
        let tokens = analyzer.analyze(text);
        if tokens.is_empty() {
            return Err(TextIndexError::EmptyDocument);
        }

        let mut builder = Schema::builder();
        let indexing = TextFieldIndexing::default()
            .set_tokenizer(TOKENIZER)
            .set_index_option(IndexRecordOption::WithFreqs)
            .set_fieldnorms(true);
        let field = builder.add_text_field(FIELD, TextOptions::default().set_indexing_options(indexing));

        let index = Index::create_in_ram(builder.build());
        // Tokens are already analyzed; the index only splits them back apart
        index.tokenizers().register(
            TOKENIZER,
            TextAnalyzer::builder(WhitespaceTokenizer::default()).build(),
        );

        let mut writer: IndexWriter = index.writer_with_num_threads(1, WRITER_MEMORY_BUDGET)?;
        writer.add_document(doc!(field => tokens.join(" ")))?;
        writer.commit()?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        Ok(Self {
            analyzer,
            field,
            reader,
            length: tokens.len() as u32,
        })
    }

    pub fn term_frequency(&self, term: &str) -> Result<u32, TextIndexError> {
        let term = Term::from_field_text(self.field, term);
        self.frequency(&self.reader.searcher(), &term)
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    /// Scores the OR of every analyzed query term. Repeated terms each
    /// contribute; `None` when no term occurs in the document.
    pub fn search(&self, query: &str, similarity: Similarity) -> Result<Option<f64>, TextIndexError> {
        let clauses: Vec<Term> = self
            .analyzer
            .analyze(query)
            .iter()
            .map(|token| Term::from_field_text(self.field, token))
            .collect();
        if clauses.is_empty() {
            return Err(TextIndexError::EmptyQuery);
        }

        let searcher = self.reader.searcher();
        match similarity {
            Similarity::Bm25 => Self::bm25(&searcher, clauses),
            Similarity::Classic => self.classic(&searcher, &clauses),
        }
    }

    fn bm25(searcher: &Searcher, clauses: Vec<Term>) -> Result<Option<f64>, TextIndexError> {
        let clauses = clauses
            .into_iter()
            .map(|term| {
                let query: Box<dyn Query> = Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs));
                (Occur::Should, query)
            })
            .collect();

        let top = searcher.search(&BooleanQuery::new(clauses), &TopDocs::with_limit(1))?;
        Ok(top.first().map(|(score, _)| f64::from(*score)))
    }

    /// `sqrt(f) * idf^2 / sqrt(dl)` per clause with `idf = 1 + ln((N + 1) / (n + 1))`
    fn classic(&self, searcher: &Searcher, clauses: &[Term]) -> Result<Option<f64>, TextIndexError> {
        let num_docs = searcher.num_docs() as f64;
        let doc_len = self.length as f64;

        let mut score: Option<f64> = None;
        for term in clauses {
            let freq = self.frequency(searcher, term)?;
            if freq == 0 {
                continue;
            }
            let doc_freq = searcher.doc_freq(term)? as f64;
            let idf = 1.0 + ((num_docs + 1.0) / (doc_freq + 1.0)).ln();
            *score.get_or_insert(0.0) += (freq as f64).sqrt() * idf * idf / doc_len.sqrt();
        }

        Ok(score)
    }

    fn frequency(&self, searcher: &Searcher, term: &Term) -> Result<u32, TextIndexError> {
        let mut total = 0;
        for segment in searcher.segment_readers() {
            let postings = segment
                .inverted_index(self.field)?
                .read_postings(term, IndexRecordOption::WithFreqs)?;
            if let Some(postings) = postings {
                if postings.doc() != TERMINATED {
                    total += postings.term_freq();
                }
            }
        }
        Ok(total)
    }
}
