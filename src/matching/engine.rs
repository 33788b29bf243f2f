//! Matching engine: scores a profile against a job and assembles the document

use super::dates::ReferenceClock;
use super::scoring::{MatchingScoringService, ScoreBreakdown};
use super::sections::CvSectionsBuilder;
use crate::config::Config;
use crate::model::{
    CandidateProfile, GeneratedDocument, GenerationOptions, JobPosting, TextRelevanceStrategy,
};
use crate::output::{DocumentRenderer, TemplateRenderer};
use crate::relevance::TextRelevanceScorer;
use std::sync::Arc;

/// Façade over the scoring service, sections builder and renderer.
///
/// Holds no per-call state; one engine can serve concurrent calls.
#[derive(Clone)]
pub struct MatchingEngine {
    scoring: MatchingScoringService,
    sections: CvSectionsBuilder,
    text_relevance: TextRelevanceScorer,
    renderer: Arc<dyn DocumentRenderer>,
}

impl MatchingEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            scoring: MatchingScoringService::new(config.scoring.clone(), ReferenceClock::System),
            sections: CvSectionsBuilder::new(),
            text_relevance: TextRelevanceScorer::new(),
            renderer: Arc::new(TemplateRenderer::default()),
        }
    }

    /// Pins "now" for recency, total years and the generation timestamp
    pub fn with_clock(mut self, clock: ReferenceClock) -> Self {
        let config = self.scoring.config().clone();
        self.scoring = MatchingScoringService::new(config, clock);
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn DocumentRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn clock(&self) -> ReferenceClock {
        self.scoring.clock()
    }

    pub fn generate(
        &self,
        profile: &CandidateProfile,
        job: &JobPosting,
        options: &GenerationOptions,
    ) -> GeneratedDocument {
        let now = self.scoring.clock().current_month();
        let meta = self.scoring.build_meta(profile, job);

        let mut document = GeneratedDocument {
            meta,
            header: self.sections.build_header(profile),
            summary: profile.summary.clone(),
            skills_section: self.sections.build_skills_section(profile, job),
            experience_section: self.sections.build_experience_section(
                profile,
                job,
                options,
                self.scoring.experience_scorer(),
                now,
            ),
            education_section: self.sections.build_education_section(profile),
            languages_section: self.sections.build_languages_section(profile),
            output: Default::default(),
        };

        self.render_into(&mut document, options);

        log::info!(
            "Generated document for job '{}' with overall score {:.3}",
            job.id,
            document.meta.matching_score_overall
        );
        document
    }

    /// Re-renders after the document's sections were changed by a caller
    pub fn render_into(&self, document: &mut GeneratedDocument, options: &GenerationOptions) {
        match self.renderer.render(document, options) {
            Ok(output) => document.output = output,
            Err(e) => {
                log::warn!("Rendering document for job '{}' failed: {}", document.meta.job_id, e);
                document.output = Default::default();
            }
        }
    }

    pub fn breakdown(&self, profile: &CandidateProfile, job: &JobPosting) -> ScoreBreakdown {
        self.scoring.breakdown(profile, job)
    }

    /// Independent IR signal; never part of the overall score
    pub fn text_relevance(
        &self,
        profile: &CandidateProfile,
        job: &JobPosting,
        strategy: TextRelevanceStrategy,
    ) -> f64 {
        self.text_relevance.score(profile, job, strategy)
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
