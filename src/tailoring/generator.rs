//! Tailored CV generation on top of the matching engine

use super::summary::focused_summary;
use crate::matching::{rank_skills, MatchingEngine};
use crate::model::{
    CandidateProfile, GeneratedDocument, GenerationOptions, JobPosting, ALL_SKILLS_GROUP,
};

#[derive(Clone)]
pub struct CvGenerator {
    engine: MatchingEngine,
}

impl CvGenerator {
    pub fn new(engine: MatchingEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    /// Engine output with a job-focused summary and skills ordered by requirement tier
    pub fn generate(
        &self,
        profile: &CandidateProfile,
        job: &JobPosting,
        options: &GenerationOptions,
    ) -> GeneratedDocument {
        let mut document = self.engine.generate(profile, job, options);

        document.summary = focused_summary(profile, job);

        let ranked = rank_skills(profile, job);
        document
            .skills_section
            .skills_grouped
            .insert(ALL_SKILLS_GROUP.to_string(), ranked.clone());
        document.skills_section.highlighted_skills = ranked;

        self.engine.render_into(&mut document, options);
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::ReferenceClock;
    use chrono::NaiveDate;

    fn generator() -> CvGenerator {
        let clock = ReferenceClock::Fixed(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        CvGenerator::new(MatchingEngine::default().with_clock(clock))
    }

    #[test]
    fn test_tailored_document_ranks_skills_and_focuses_summary() {
        let mut profile = CandidateProfile::new("Ada", "Engineer")
            .with_skills(["python", "Docker", "Rust", "Go"]);
        profile.summary = vec!["Systems engineer".into()];

        let mut job = JobPosting::new("j-9", "Platform Engineer");
        job.requirements.must_have_skills = vec!["Rust".into()];
        job.requirements.nice_to_have_skills = vec!["Go".into()];
        job.requirements.tools = vec!["Docker".into()];

        let doc = generator().generate(&profile, &job, &GenerationOptions::default());

        let expected = vec!["Rust", "Go", "Docker", "python"];
        assert_eq!(doc.skills_section.highlighted_skills, expected);
        assert_eq!(doc.skills_section.skills_grouped[ALL_SKILLS_GROUP], expected);
        assert_eq!(doc.summary, vec!["Systems engineer", "Key skills: Rust, Go, Docker"]);
        assert!(doc.output.markdown.contains("- Key skills: Rust, Go, Docker"));
        assert!(doc.output.markdown.contains("Rust · Go · Docker · python"));
    }

    #[test]
    fn test_scores_match_untailored_generation() {
        let profile = CandidateProfile::new("Ada", "Engineer").with_skills(["Rust"]);
        let job = JobPosting::new("j", "t");
        let generator = generator();

        let tailored = generator.generate(&profile, &job, &GenerationOptions::default());
        let plain = generator.engine().generate(&profile, &job, &GenerationOptions::default());
        assert_eq!(tailored.meta, plain.meta);
    }
}
