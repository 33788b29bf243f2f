//! Domain fit: coverage over industry tags

use super::skills::normalize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
pub struct DomainScorer {
    neutral: f64,
}

impl DomainScorer {
    pub fn new(neutral: f64) -> Self {
        Self { neutral }
    }

    /// Neutral when the job names no domains, zero when the candidate names none,
    /// otherwise the fraction of job domains the candidate covers.
    pub fn domain_fit<'a, C>(&self, candidate: C, job_domains: &[String]) -> f64
    where
        C: IntoIterator<Item = &'a String>,
    {
        if job_domains.is_empty() {
            return self.neutral;
        }

        let candidate: HashSet<String> = candidate.into_iter().map(|d| normalize(d)).collect();
        if candidate.is_empty() {
            return 0.0;
        }

        let matched = job_domains
            .iter()
            .filter(|domain| candidate.contains(&normalize(domain)))
            .count();

        matched as f64 / job_domains.len() as f64
    }
}

impl Default for DomainScorer {
    fn default() -> Self {
        Self::new(0.5)
    }
}
