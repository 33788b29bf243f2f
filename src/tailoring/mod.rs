//! Tailored generation: focused summary, ranked skills, threshold policy and batches

pub mod generator;
pub mod policy;
pub mod summary;

pub use generator::CvGenerator;
pub use policy::{BatchMatcher, BatchResult, ThresholdPolicy};
pub use summary::focused_summary;
