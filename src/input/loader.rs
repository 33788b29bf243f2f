//! Loads profiles, job postings and options from JSON or TOML files

use crate::error::{MatchingError, Result};
use crate::input::file_detector::FileType;
use crate::model::{CandidateProfile, GenerationOptions, JobPosting};
use log::info;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Default)]
pub struct InputLoader;

/// Job postings read from a directory plus the files that could not be read
#[derive(Debug, Default)]
pub struct LoadedJobs {
    pub jobs: Vec<JobPosting>,
    pub failures: Vec<(PathBuf, MatchingError)>,
}

impl InputLoader {
    pub fn new() -> Self {
        Self
    }

    pub async fn load_profile(&self, path: &Path) -> Result<CandidateProfile> {
        info!("Loading candidate profile: {}", path.display());
        self.load(path).await
    }

    pub async fn load_job(&self, path: &Path) -> Result<JobPosting> {
        info!("Loading job posting: {}", path.display());
        self.load(path).await
    }

    pub async fn load_options(&self, path: &Path) -> Result<GenerationOptions> {
        self.load(path).await
    }

    /// Every `.json`/`.toml` file in `dir`, sorted by file name. Other files are ignored.
    pub async fn load_jobs_dir(&self, dir: &Path) -> Result<LoadedJobs> {
        if !dir.is_dir() {
            return Err(MatchingError::InvalidInput(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }

        let mut paths = Vec::new();
        let mut entries = fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_file() && FileType::from_path(&path) != FileType::Unknown {
                paths.push(path);
            }
        }
        paths.sort();

        let mut loaded = LoadedJobs::default();
        for path in paths {
            match self.load::<JobPosting>(&path).await {
                Ok(job) => loaded.jobs.push(job),
                Err(e) => {
                    log::warn!("Skipping job file {}: {}", path.display(), e);
                    loaded.failures.push((path, e));
                }
            }
        }

        info!(
            "Loaded {} job postings from {} ({} unreadable)",
            loaded.jobs.len(),
            dir.display(),
            loaded.failures.len()
        );
        Ok(loaded)
    }

    async fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        if !path.exists() {
            return Err(MatchingError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path);
        if file_type == FileType::Unknown {
            return Err(MatchingError::UnsupportedFormat(format!(
                "Expected .json or .toml: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).await?;
        parse(&content, file_type)
    }
}

fn parse<T: DeserializeOwned>(content: &str, file_type: FileType) -> Result<T> {
    match file_type {
        FileType::Json => Ok(serde_json::from_str(content)?),
        FileType::Toml => Ok(toml::from_str(content)?),
        FileType::Unknown => Err(MatchingError::UnsupportedFormat(
            "unknown input format".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_json_and_toml_jobs() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("a.json"),
            r#"{ "id": "a", "title": "Backend", "requirements": { "must_have_skills": ["Rust"] } }"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("b.toml"),
            "id = \"b\"\ntitle = \"Frontend\"\n[requirements]\ntools = [\"Vite\"]\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("c.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let loaded = InputLoader::new().load_jobs_dir(dir.path()).await.unwrap();

        let ids: Vec<&str> = loaded.jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(loaded.jobs[1].requirements.tools, vec!["Vite"]);
        assert_eq!(loaded.failures.len(), 1);
        assert!(matches!(loaded.failures[0].1, MatchingError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_rejects_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, "%PDF").unwrap();

        let err = InputLoader::new().load_profile(&path).await.unwrap_err();
        assert!(matches!(err, MatchingError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_invalid_input() {
        let err = InputLoader::new()
            .load_job(Path::new("/definitely/not/here.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchingError::InvalidInput(_)));
    }
}
