//! ATS matching engine library
//!
//! Scores a structured candidate profile against job postings, builds
//! job-tailored CV documents and renders them to Markdown, HTML and JSON.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod matching;
pub mod model;
pub mod output;
pub mod relevance;
pub mod tailoring;

pub use config::Config;
pub use error::{MatchingError, Result};
pub use matching::{MatchingEngine, ScoreBreakdown};
pub use model::{CandidateProfile, GeneratedDocument, GenerationOptions, JobPosting};
pub use tailoring::{BatchMatcher, BatchResult, CvGenerator, ThresholdPolicy};
