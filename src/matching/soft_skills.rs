//! Soft-skill presence in the candidate's narrative text

use crate::model::{CandidateProfile, JobPosting};
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
pub struct SoftSkillScorer {
    neutral: f64,
}

impl SoftSkillScorer {
    pub fn new(neutral: f64) -> Self {
        Self { neutral }
    }

    /// Fraction of the job's soft skills found as case-insensitive substrings
    /// of the candidate narrative. Substring containment, not word boundaries.
    pub fn score(&self, profile: &CandidateProfile, job: &JobPosting) -> f64 {
        let soft_skills = &job.soft_skills;
        if soft_skills.is_empty() {
            return self.neutral;
        }

        let blob = narrative_blob(profile);
        let patterns: Vec<String> = soft_skills.iter().map(|s| s.to_lowercase()).collect();
        let found = find_patterns(&blob, &patterns);

        let matched = patterns
            .iter()
            .enumerate()
            .filter(|(idx, pattern)| pattern.is_empty() || found.contains(idx))
            .count();

        log::debug!(
            "Soft skills matched {}/{} for job '{}'",
            matched,
            soft_skills.len(),
            job.id
        );

        matched as f64 / soft_skills.len() as f64
    }
}

impl Default for SoftSkillScorer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Summary lines then each project's situation, task, result and actions, lowercased
pub fn narrative_blob(profile: &CandidateProfile) -> String {
    let mut parts: Vec<&str> = profile.summary.iter().map(String::as_str).collect();
    parts.extend(
        profile
            .experiences
            .iter()
            .flat_map(|exp| exp.projects.iter())
            .flat_map(|project| project.narrative()),
    );
    parts.join(" ").to_lowercase()
}

/// Indices of non-empty patterns occurring anywhere in `haystack`
fn find_patterns(haystack: &str, patterns: &[String]) -> HashSet<usize> {
    let indexed: Vec<(usize, &str)> = patterns
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_empty())
        .map(|(idx, p)| (idx, p.as_str()))
        .collect();

    if indexed.is_empty() {
        return HashSet::new();
    }

    let matcher = AhoCorasick::builder()
        .match_kind(MatchKind::Standard)
        .build(indexed.iter().map(|(_, p)| *p));

    match matcher {
        Ok(matcher) => matcher
            .find_overlapping_iter(haystack)
            .map(|m| indexed[m.pattern().as_usize()].0)
            .collect(),
        Err(e) => {
            log::warn!("Soft skill matcher build failed, scanning linearly: {}", e);
            indexed
                .iter()
                .filter(|(_, p)| haystack.contains(p))
                .map(|(idx, _)| *idx)
                .collect()
        }
    }
}
