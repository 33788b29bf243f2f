//! Caller-side acceptance threshold and batch matching across many jobs

use super::generator::CvGenerator;
use crate::config::GenerationConfig;
use crate::error::{MatchingError, Result};
use crate::model::{CandidateProfile, GeneratedDocument, GenerationOptions, JobPosting};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinSet;

pub const MIN_BATCH_LIMIT: usize = 1;
pub const MAX_BATCH_LIMIT: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPolicy {
    pub min_score: f64,
}

impl ThresholdPolicy {
    pub fn new(min_score: f64) -> Self {
        Self { min_score }
    }

    /// `relevance_threshold` from the options when set, else the configured minimum
    pub fn from_options(options: &GenerationOptions, config: &GenerationConfig) -> Self {
        Self::new(options.relevance_threshold.unwrap_or(config.min_match_score))
    }

    pub fn check(&self, document: &GeneratedDocument) -> Result<()> {
        let score = document.meta.matching_score_overall;
        if score < self.min_score {
            return Err(MatchingError::BelowThreshold {
                score,
                threshold: self.min_score,
            });
        }
        Ok(())
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::new(GenerationConfig::default().min_match_score)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub total_jobs: usize,
    pub generated: usize,
    pub skipped_below_threshold: usize,
    pub failed: usize,
    /// Accepted documents, best overall score first
    pub documents: Vec<GeneratedDocument>,
}

pub struct BatchMatcher {
    generator: CvGenerator,
    policy: ThresholdPolicy,
}

impl BatchMatcher {
    pub fn new(generator: CvGenerator, policy: ThresholdPolicy) -> Self {
        Self { generator, policy }
    }

    pub fn bounded_limit(limit: usize) -> usize {
        limit.clamp(MIN_BATCH_LIMIT, MAX_BATCH_LIMIT)
    }

    /// Generates a tailored document for up to `limit` jobs in parallel and
    /// keeps those passing the threshold policy.
    pub async fn run(
        &self,
        profile: &CandidateProfile,
        jobs: Vec<JobPosting>,
        options: &GenerationOptions,
        limit: usize,
    ) -> BatchResult {
        let bounded = Self::bounded_limit(limit);
        let profile = Arc::new(profile.clone());
        let options = Arc::new(options.clone());

        let mut tasks = JoinSet::new();
        for job in jobs.into_iter().take(bounded) {
            let generator = self.generator.clone();
            let profile = Arc::clone(&profile);
            let options = Arc::clone(&options);
            tasks.spawn_blocking(move || generator.generate(&profile, &job, &options));
        }

        let mut result = BatchResult {
            total_jobs: tasks.len(),
            ..BatchResult::default()
        };

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(document) => match self.policy.check(&document) {
                    Ok(()) => {
                        result.generated += 1;
                        result.documents.push(document);
                    }
                    Err(e) => {
                        log::debug!("Skipping job '{}': {}", document.meta.job_id, e);
                        result.skipped_below_threshold += 1;
                    }
                },
                Err(e) => {
                    log::warn!("Batch generation task failed: {}", e);
                    result.failed += 1;
                }
            }
        }

        result.documents.sort_by(|a, b| {
            b.overall_score()
                .total_cmp(&a.overall_score())
                .then_with(|| a.meta.job_id.cmp(&b.meta.job_id))
        });

        log::info!(
            "Batch finished: {} generated, {} below threshold, {} failed of {} jobs",
            result.generated,
            result.skipped_below_threshold,
            result.failed,
            result.total_jobs
        );
        result
    }
}
