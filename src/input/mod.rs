//! Input loading module
//! Reads candidate profiles, job postings and generation options from disk

pub mod file_detector;
pub mod loader;

pub use file_detector::FileType;
pub use loader::{InputLoader, LoadedJobs};
