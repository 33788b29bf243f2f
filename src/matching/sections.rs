//! Builds the sections of a tailored document from a profile and a job

use super::dates::YearMonth;
use super::experience::ExperienceScorer;
use super::skills::{collect_skills, normalize, skill_matches};
use crate::model::{
    CandidateProfile, EducationSection, ExperienceSection, GenerationOptions, Header,
    JobPosting, LanguageSection, SkillsSection, ALL_SKILLS_GROUP,
};
use indexmap::{IndexMap, IndexSet};
use std::cmp::Ordering;

const MUST_HAVE_TIER: f64 = 2.0;
const NICE_TO_HAVE_TIER: f64 = 1.0;
const TOOLS_TIER: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default)]
pub struct CvSectionsBuilder;

impl CvSectionsBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build_header(&self, profile: &CandidateProfile) -> Header {
        Header {
            name: profile.name.clone(),
            title: profile.title.clone(),
            location: profile.location.clone(),
            phone: profile.phone.clone(),
            email: profile.email.clone(),
            linkedin: profile.linkedin.clone(),
        }
    }

    /// Highlights at most one candidate skill per required token, the first
    /// one in collection order that matches it.
    pub fn build_skills_section(&self, profile: &CandidateProfile, job: &JobPosting) -> SkillsSection {
        let all_skills = collect_skills(profile);

        let highlighted: IndexSet<String> = first_matches(&all_skills, job).into_iter().collect();

        let mut skills_grouped = IndexMap::new();
        skills_grouped.insert(ALL_SKILLS_GROUP.to_string(), all_skills.into_iter().collect());

        SkillsSection {
            highlighted_skills: highlighted.into_iter().collect(),
            skills_grouped,
        }
    }

    /// Every experience scored, sorted by descending relevance (stable), then
    /// filtered and capped according to `options`.
    pub fn build_experience_section(
        &self,
        profile: &CandidateProfile,
        job: &JobPosting,
        options: &GenerationOptions,
        scorer: &ExperienceScorer,
        now: YearMonth,
    ) -> Vec<ExperienceSection> {
        let mut sections: Vec<ExperienceSection> = profile
            .experiences
            .iter()
            .map(|exp| {
                let mut bullets = Vec::new();
                for project in &exp.projects {
                    bullets.extend(project.actions.iter().cloned());
                    if let Some(result) = project.result.as_ref().filter(|r| !r.is_empty()) {
                        bullets.push(result.clone());
                    }
                }
                let tech_stack: IndexSet<String> = exp.tech_stack().cloned().collect();

                ExperienceSection {
                    company: exp.company.clone(),
                    country: exp.country.clone(),
                    title: exp.title.clone(),
                    start: exp.start.clone(),
                    end: exp.end.clone(),
                    relevance_score: scorer.relevance(exp, job, now),
                    bullets,
                    tech_stack: tech_stack.into_iter().collect(),
                }
            })
            .collect();

        sections.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        apply_experience_options(&mut sections, options);
        sections
    }

    pub fn build_education_section(&self, profile: &CandidateProfile) -> Vec<EducationSection> {
        profile
            .education
            .iter()
            .map(|edu| EducationSection {
                degree: edu.degree.clone(),
                institution: edu.institution.clone(),
                country: edu.country.clone(),
                start: edu.start.clone(),
                end: edu.end.clone(),
            })
            .collect()
    }

    pub fn build_languages_section(&self, profile: &CandidateProfile) -> Vec<LanguageSection> {
        profile
            .languages
            .iter()
            .map(|lang| LanguageSection {
                name: lang.name.clone(),
                level: lang.level.clone(),
            })
            .collect()
    }
}

/// For each required token (must-have, nice-to-have, tools), the first matching
/// candidate skill. The same candidate skill may appear more than once.
pub fn first_matches(candidate_skills: &IndexSet<String>, job: &JobPosting) -> Vec<String> {
    job.requirements
        .all_skill_tokens()
        .iter()
        .filter_map(|required| {
            candidate_skills
                .iter()
                .find(|candidate| skill_matches(candidate, required))
                .cloned()
        })
        .collect()
}

/// Candidate skills ordered by requirement tier (must-have 2.0, nice-to-have 1.0,
/// tools 0.5, other 0.0), ties broken case-insensitively.
pub fn rank_skills(profile: &CandidateProfile, job: &JobPosting) -> Vec<String> {
    let requirements = &job.requirements;
    let tier_of = |skill: &str| {
        let skill = normalize(skill);
        let hits = |list: &[String]| list.iter().any(|req| normalize(req) == skill);

        if hits(&requirements.must_have_skills) {
            MUST_HAVE_TIER
        } else if hits(&requirements.nice_to_have_skills) {
            NICE_TO_HAVE_TIER
        } else if hits(&requirements.tools) {
            TOOLS_TIER
        } else {
            0.0
        }
    };

    let mut ranked: Vec<(f64, String)> = collect_skills(profile)
        .into_iter()
        .map(|skill| (tier_of(&skill), skill))
        .collect();

    ranked.sort_by(|(tier_a, a), (tier_b, b)| {
        tier_b
            .total_cmp(tier_a)
            .then_with(|| compare_ignore_case(a, b))
    });

    ranked.into_iter().map(|(_, skill)| skill).collect()
}

/// Drops entries below the threshold when `include_only_relevant_experiences`
/// is set, then keeps the first `max_experiences` when positive.
pub fn apply_experience_options(sections: &mut Vec<ExperienceSection>, options: &GenerationOptions) {
    if sections.is_empty() {
        return;
    }

    if options.include_only_relevant_experiences {
        if let Some(threshold) = options.relevance_threshold {
            sections.retain(|section| section.relevance_score >= threshold);
        }
    }

    if let Some(max) = options.max_experiences.filter(|max| *max > 0) {
        sections.truncate(max as usize);
    }
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Education, Experience, Language, Project};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn section(company: &str, score: f64) -> ExperienceSection {
        ExperienceSection {
            company: company.to_string(),
            relevance_score: score,
            ..ExperienceSection::default()
        }
    }

    /// Already in the descending order `build_experience_section` produces
    fn scored_sections() -> Vec<ExperienceSection> {
        vec![section("b", 0.9), section("c", 0.6), section("a", 0.3)]
    }

    fn scores(sections: &[ExperienceSection]) -> Vec<f64> {
        sections.iter().map(|s| s.relevance_score).collect()
    }

    fn job() -> JobPosting {
        let mut job = JobPosting::new("j-1", "Backend");
        job.requirements.must_have_skills = strings(&["java", "Kubernetes"]);
        job.requirements.nice_to_have_skills = strings(&["redis"]);
        job.requirements.tools = strings(&["Git", "JAVA"]);
        job
    }

    fn profile() -> CandidateProfile {
        CandidateProfile::new("Ada", "Engineer")
            .with_skills(["Java", "Python", "git", "java"])
            .with_experience(
                Experience::new("Acme", "Dev")
                    .period("2022-01", "present")
                    .with_project(Project::with_tech_stack(["Redis", "Java"])),
            )
    }

    #[test]
    fn test_options_filter_then_cap() {
        let mut sections = scored_sections();
        assert_eq!(scores(&sections), vec![0.9, 0.6, 0.3]);

        let mut options = GenerationOptions {
            include_only_relevant_experiences: true,
            relevance_threshold: Some(0.5),
            ..GenerationOptions::default()
        };
        apply_experience_options(&mut sections, &options);
        assert_eq!(scores(&sections), vec![0.9, 0.6]);

        let mut sections = scored_sections();
        options.max_experiences = Some(1);
        apply_experience_options(&mut sections, &options);
        assert_eq!(scores(&sections), vec![0.9]);
    }

    #[test]
    fn test_threshold_ignored_unless_only_relevant() {
        let mut sections = scored_sections();
        let options = GenerationOptions {
            relevance_threshold: Some(0.95),
            max_experiences: Some(0),
            ..GenerationOptions::default()
        };
        apply_experience_options(&mut sections, &options);
        assert_eq!(sections.len(), 3);
    }

    #[test]
    fn test_experience_section_sorted_by_relevance() {
        let mut profile = CandidateProfile::new("Ada", "Engineer");
        for (company, stack) in [("none", vec![]), ("both", vec!["Java", "Kafka"]), ("one", vec!["Java"])] {
            profile.experiences.push(
                Experience::new(company, "Dev")
                    .period("2020-01", "present")
                    .with_project(Project::with_tech_stack(stack)),
            );
        }
        let mut job = JobPosting::new("j", "t");
        job.requirements.must_have_skills = strings(&["Java", "Kafka"]);

        let sections = CvSectionsBuilder::new().build_experience_section(
            &profile,
            &job,
            &GenerationOptions::default(),
            &ExperienceScorer::default(),
            YearMonth::parse("2024-06").unwrap(),
        );

        let order: Vec<&str> = sections.iter().map(|s| s.company.as_str()).collect();
        assert_eq!(order, vec!["both", "one", "none"]);
        let expected = [0.9, 0.6, 0.3];
        for (section, expected) in sections.iter().zip(expected) {
            assert!((section.relevance_score - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_experience_section_sorted_stably() {
        let mut profile = CandidateProfile::new("Ada", "Engineer");
        for (company, end) in [("old", "2010-01"), ("current", "present"), ("also-current", "present")] {
            profile
                .experiences
                .push(Experience::new(company, "Dev").period("2009-01", end));
        }

        let now = YearMonth::parse("2024-06").unwrap();
        let sections = CvSectionsBuilder::new().build_experience_section(
            &profile,
            &JobPosting::new("j", "t"),
            &GenerationOptions::default(),
            &ExperienceScorer::default(),
            now,
        );

        let order: Vec<&str> = sections.iter().map(|s| s.company.as_str()).collect();
        assert_eq!(order, vec!["current", "also-current", "old"]);
    }

    #[test]
    fn test_experience_bullets_and_stack() {
        let mut profile = CandidateProfile::new("Ada", "Engineer");
        profile.experiences.push(
            Experience::new("Acme", "Dev")
                .with_project(Project {
                    actions: strings(&["Built API", "Added tracing"]),
                    result: Some("Latency -40%".into()),
                    tech_stack: strings(&["Rust", "Tokio"]),
                    ..Project::default()
                })
                .with_project(Project {
                    actions: strings(&["Migrated DB"]),
                    result: Some(String::new()),
                    tech_stack: strings(&["Rust", "Postgres"]),
                    ..Project::default()
                }),
        );

        let sections = CvSectionsBuilder::new().build_experience_section(
            &profile,
            &JobPosting::new("j", "t"),
            &GenerationOptions::default(),
            &ExperienceScorer::default(),
            YearMonth::parse("2024-06").unwrap(),
        );

        assert_eq!(
            sections[0].bullets,
            strings(&["Built API", "Added tracing", "Latency -40%", "Migrated DB"])
        );
        assert_eq!(sections[0].tech_stack, strings(&["Rust", "Tokio", "Postgres"]));
    }

    #[test]
    fn test_highlighted_skills_one_per_required_token() {
        let skills = CvSectionsBuilder::new().build_skills_section(&profile(), &job());

        assert_eq!(skills.highlighted_skills, strings(&["Java", "Redis", "git"]));
        assert_eq!(
            skills.skills_grouped[ALL_SKILLS_GROUP],
            strings(&["Java", "Python", "git", "java", "Redis"])
        );

        let requested = job().requirements.all_skill_tokens();
        for skill in &skills.highlighted_skills {
            assert!(requested.iter().any(|req| skill_matches(skill, req)));
        }
    }

    #[test]
    fn test_first_matches_keeps_duplicates_across_lists() {
        let matched = first_matches(&collect_skills(&profile()), &job());
        assert_eq!(matched, strings(&["Java", "Redis", "git", "Java"]));
    }

    #[test]
    fn test_rank_skills_by_tier_then_name() {
        let mut job = job();
        job.requirements.tools = strings(&["Git"]);

        let ranked = rank_skills(&profile(), &job);
        assert_eq!(ranked, strings(&["Java", "java", "Redis", "git", "Python"]));
    }

    #[test]
    fn test_pass_through_sections() {
        let mut profile = profile();
        profile.education.push(Education {
            degree: Some("BSc".into()),
            institution: Some("MIT".into()),
            ..Education::default()
        });
        profile.languages.push(Language {
            name: "English".into(),
            level: Some("native".into()),
        });

        let builder = CvSectionsBuilder::new();
        assert_eq!(builder.build_education_section(&profile)[0].degree.as_deref(), Some("BSc"));
        assert_eq!(builder.build_languages_section(&profile)[0].name, "English");
        assert_eq!(builder.build_header(&profile).name, "Ada");
    }
}
