//! Per-experience relevance

use super::dates::{RecencyDecay, YearMonth};
use super::domain::DomainScorer;
use super::skills::coverage;
use crate::config::{ExperienceWeights, ScoringConfig};
use crate::model::{Experience, JobPosting};
use indexmap::IndexSet;

#[derive(Debug, Clone, Copy)]
pub struct ExperienceScorer {
    weights: ExperienceWeights,
    domains: DomainScorer,
    recency: RecencyDecay,
}

impl ExperienceScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            weights: config.experience,
            domains: DomainScorer::new(config.neutral_score),
            recency: RecencyDecay::new(&config.recency),
        }
    }

    /// Weighted blend of the experience's own skill coverage against every
    /// job skill token, its project domains and how recently it ended.
    pub fn relevance(&self, experience: &Experience, job: &JobPosting, now: YearMonth) -> f64 {
        let requirements = &job.requirements;

        let stack: IndexSet<&String> = experience.tech_stack().collect();
        let skill_score = coverage(stack, &requirements.all_skill_tokens());

        let domain_score = self
            .domains
            .domain_fit(experience.domains(), &requirements.domains);

        let recency_score = self.recency.score(experience.end.as_deref(), now);

        self.weights.skill * skill_score
            + self.weights.domain * domain_score
            + self.weights.recency * recency_score
    }
}

impl Default for ExperienceScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Project;

    fn now() -> YearMonth {
        YearMonth::parse("2024-06").unwrap()
    }

    fn job(must: &[&str], domains: &[&str]) -> JobPosting {
        let mut job = JobPosting::new("j-1", "Backend");
        job.requirements.must_have_skills = must.iter().map(|s| s.to_string()).collect();
        job.requirements.domains = domains.iter().map(|s| s.to_string()).collect();
        job
    }

    #[test]
    fn test_half_coverage_current_role() {
        let exp = Experience::new("Acme", "Dev")
            .period("2020-01", "present")
            .with_project(Project::with_tech_stack(["Java", "Redis"]));

        let score = ExperienceScorer::default().relevance(&exp, &job(&["Java", "Spring Boot"], &[]), now());
        assert!((score - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_domain_component_uses_project_domains() {
        let exp = Experience::new("Acme", "Dev")
            .period("2020-01", "present")
            .with_project(Project {
                tech_stack: vec!["Go".into()],
                domains: vec!["Payments".into()],
                ..Project::default()
            });

        let scorer = ExperienceScorer::default();
        let matched = scorer.relevance(&exp, &job(&["Go"], &["payments"]), now());
        let unmatched = scorer.relevance(&exp, &job(&["Go"], &["gaming"]), now());

        assert!((matched - 1.0).abs() < 1e-12);
        assert!((unmatched - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_experience_without_projects() {
        let exp = Experience::new("Acme", "Dev").period("2010-01", "2012-01");

        // no job skills: full coverage; no job domains: neutral; old: floor
        let score = ExperienceScorer::default().relevance(&exp, &job(&[], &[]), now());
        assert!((score - (0.6 + 0.1 + 0.04)).abs() < 1e-12);
    }
}
