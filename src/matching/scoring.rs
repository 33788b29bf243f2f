//! Overall match score and its breakdown

use super::dates::{total_years, ReferenceClock, YearMonth};
use super::domain::DomainScorer;
use super::experience::ExperienceScorer;
use super::skills::{collect_skills, coverage};
use super::soft_skills::SoftSkillScorer;
use crate::config::ScoringConfig;
use crate::model::{CandidateProfile, JobPosting, MatchingDetails, Meta};
use serde::{Deserialize, Serialize};

/// Every sub-score that feeds the overall score, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub domain: f64,
    pub years: f64,
    pub soft_skills: f64,
    pub experience: f64,
    pub overall: f64,
}

#[derive(Debug, Clone)]
pub struct MatchingScoringService {
    config: ScoringConfig,
    experience: ExperienceScorer,
    domains: DomainScorer,
    soft_skills: SoftSkillScorer,
    clock: ReferenceClock,
}

impl MatchingScoringService {
    pub fn new(config: ScoringConfig, clock: ReferenceClock) -> Self {
        Self {
            experience: ExperienceScorer::new(&config),
            domains: DomainScorer::new(config.neutral_score),
            soft_skills: SoftSkillScorer::new(config.neutral_score),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn experience_scorer(&self) -> &ExperienceScorer {
        &self.experience
    }

    pub fn clock(&self) -> ReferenceClock {
        self.clock
    }

    pub fn breakdown(&self, profile: &CandidateProfile, job: &JobPosting) -> ScoreBreakdown {
        let now = self.clock.current_month();
        let requirements = &job.requirements;
        let tiers = &self.config.skill_tiers;

        let candidate_skills = collect_skills(profile);
        let skills = tiers.must_have * coverage(&candidate_skills, &requirements.must_have_skills)
            + tiers.nice_to_have * coverage(&candidate_skills, &requirements.nice_to_have_skills)
            + tiers.tools * coverage(&candidate_skills, &requirements.tools);

        let domain = self.domains.domain_fit(&profile.domains, &requirements.domains);

        let years = match requirements.required_years() {
            None => 1.0,
            Some(required) => {
                (total_years(profile, now) / required as f64).clamp(0.0, 1.0)
            }
        };

        let soft_skills = self.soft_skills.score(profile, job);
        let experience = self.average_top_experiences(profile, job, now);

        let weights = &self.config.overall;
        let overall = weights.skills * clamp_unit(skills)
            + weights.experience * clamp_unit(experience)
            + weights.domain * clamp_unit(domain)
            + weights.years * clamp_unit(years)
            + weights.soft_skills * clamp_unit(soft_skills);

        let breakdown = ScoreBreakdown {
            skills,
            domain,
            years,
            soft_skills,
            experience,
            overall: clamp_unit(overall),
        };

        log::debug!("Score breakdown for job '{}': {:?}", job.id, breakdown);
        breakdown
    }

    pub fn build_meta(&self, profile: &CandidateProfile, job: &JobPosting) -> Meta {
        let breakdown = self.breakdown(profile, job);

        Meta {
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            generation_timestamp: self.clock.timestamp(),
            matching_score_overall: breakdown.overall,
            matching_details: MatchingDetails {
                skills_coverage: breakdown.skills,
                domain_fit: breakdown.domain,
                experience_relevance: breakdown.experience,
            },
        }
    }

    /// Mean of the best `top_experiences` relevances; 0.0 without experiences
    fn average_top_experiences(
        &self,
        profile: &CandidateProfile,
        job: &JobPosting,
        now: YearMonth,
    ) -> f64 {
        let mut scores: Vec<f64> = profile
            .experiences
            .iter()
            .map(|exp| self.experience.relevance(exp, job, now))
            .collect();

        if scores.is_empty() {
            return 0.0;
        }

        scores.sort_by(|a, b| b.total_cmp(a));
        let top = &scores[..scores.len().min(self.config.top_experiences)];
        top.iter().sum::<f64>() / top.len() as f64
    }
}

impl Default for MatchingScoringService {
    fn default() -> Self {
        Self::new(ScoringConfig::default(), ReferenceClock::System)
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Experience, Project};
    use chrono::NaiveDate;

    fn service() -> MatchingScoringService {
        let clock = ReferenceClock::Fixed(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        MatchingScoringService::new(ScoringConfig::default(), clock)
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn reference_profile() -> CandidateProfile {
        CandidateProfile::new("Ada", "Engineer")
            .with_skills(["Java", "Spring Boot"])
            .with_experience(
                Experience::new("Acme", "Backend Engineer")
                    .period("2021-01", "present")
                    .with_project(Project::with_tech_stack(["Java", "Redis"])),
            )
    }

    fn reference_job() -> JobPosting {
        let mut job = JobPosting::new("job-42", "Java Developer");
        job.requirements.must_have_skills = strings(&["Java", "Spring Boot"]);
        job.requirements.years_of_experience = Some(0);
        job
    }

    #[test]
    fn test_reference_scenario_breakdown() {
        let meta = service().build_meta(&reference_profile(), &reference_job());

        assert!((meta.matching_details.skills_coverage - 1.0).abs() < 1e-12);
        assert_eq!(meta.matching_details.domain_fit, 0.5);
        assert!((meta.matching_details.experience_relevance - 0.6).abs() < 1e-12);
        // 0.45 * 1.0 + 0.20 * 0.6 + 0.10 * 0.5 + 0.10 * 1.0 + 0.15 * 0.5
        assert!((meta.matching_score_overall - 0.795).abs() < 1e-12);
        assert_eq!(meta.job_id, "job-42");
        assert_eq!(meta.job_title, "Java Developer");
        assert_eq!(meta.generation_timestamp, "2024-06-15");
    }

    #[test]
    fn test_minimal_profile_stays_in_unit_interval() {
        let mut job = reference_job();
        job.requirements.years_of_experience = Some(5);
        job.requirements.domains = strings(&["fintech"]);
        job.soft_skills = strings(&["ownership"]);

        let breakdown = service().breakdown(&CandidateProfile::default(), &job);

        assert_eq!(breakdown.experience, 0.0);
        assert_eq!(breakdown.years, 0.0);
        assert_eq!(breakdown.domain, 0.0);
        assert!((0.0..=1.0).contains(&breakdown.overall));
    }

    #[test]
    fn test_years_score_is_capped() {
        let mut job = reference_job();
        job.requirements.years_of_experience = Some(2);
        let breakdown = service().breakdown(&reference_profile(), &job);
        assert_eq!(breakdown.years, 1.0);

        job.requirements.years_of_experience = Some(7);
        let breakdown = service().breakdown(&reference_profile(), &job);
        // 2021-01 to 2024-06 is 41 months
        assert!((breakdown.years - (41.0 / 12.0) / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_only_top_three_experiences_are_averaged() {
        let mut profile = CandidateProfile::new("Ada", "Engineer");
        for _ in 0..3 {
            profile.experiences.push(
                Experience::new("Match", "Dev")
                    .period("2020-01", "present")
                    .with_project(Project::with_tech_stack(["Java", "Spring Boot"])),
            );
        }
        profile
            .experiences
            .push(Experience::new("Stale", "Dev").period("2001-01", "2003-01"));

        let breakdown = service().breakdown(&profile, &reference_job());
        assert!((breakdown.experience - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_global_skill_tiers() {
        let mut job = reference_job();
        job.requirements.must_have_skills = strings(&["Java", "Go"]);
        job.requirements.nice_to_have_skills = strings(&["Kafka"]);
        job.requirements.tools = strings(&["Redis"]);

        let breakdown = service().breakdown(&reference_profile(), &job);
        assert!((breakdown.skills - (0.6 * 0.5 + 0.25 * 0.0 + 0.15 * 1.0)).abs() < 1e-12);
    }
}
