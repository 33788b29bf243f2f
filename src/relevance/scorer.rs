//! Optional IR similarity between a candidate profile and a job posting

use super::analyzer::Analyzer;
use super::index::{Similarity, SingleDocumentIndex, TextIndexError};
use crate::error::Result;
use crate::model::{CandidateProfile, JobPosting, TextRelevanceStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct TextRelevanceScorer {
    analyzer: Analyzer,
}

impl TextRelevanceScorer {
    pub fn new() -> Self {
        Self {
            analyzer: Analyzer::new(),
        }
    }

    /// Squashed similarity in [0, 1). Disabled strategy, blank corpora and
    /// index failures all score 0.0.
    pub fn score(
        &self,
        profile: &CandidateProfile,
        job: &JobPosting,
        strategy: TextRelevanceStrategy,
    ) -> f64 {
        match self.try_score(profile, job, strategy) {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Text relevance for job '{}' failed: {}", job.id, e);
                0.0
            }
        }
    }

    /// Like [`score`](Self::score) but surfaces index failures
    pub fn try_score(
        &self,
        profile: &CandidateProfile,
        job: &JobPosting,
        strategy: TextRelevanceStrategy,
    ) -> Result<f64> {
        let similarity = match strategy {
            TextRelevanceStrategy::Disabled => return Ok(0.0),
            TextRelevanceStrategy::Bm25 => Similarity::Bm25,
            TextRelevanceStrategy::TfIdf => Similarity::Classic,
        };

        let candidate_text = candidate_corpus(profile);
        let job_text = job_corpus(job);
        if candidate_text.is_empty() || job_text.is_empty() {
            return Ok(0.0);
        }

        let raw = self.raw_score(&candidate_text, &job_text, similarity)?;
        let score = squash(raw);
        log::debug!(
            "Text relevance ({}) for job '{}': raw {:.4}, normalized {:.4}",
            strategy,
            job.id,
            raw,
            score
        );
        Ok(score)
    }

    fn raw_score(
        &self,
        document: &str,
        query: &str,
        similarity: Similarity,
    ) -> std::result::Result<f64, TextIndexError> {
        let index = SingleDocumentIndex::build(self.analyzer, document)?;
        Ok(index.search(query, similarity)?.unwrap_or(0.0))
    }
}

/// Maps an unbounded raw score onto [0, 1)
pub fn squash(raw: f64) -> f64 {
    if raw <= 0.0 {
        0.0
    } else {
        1.0 - (-raw).exp()
    }
}

/// Summary, skills, domains, experience titles and companies, project
/// narrative and stacks, then education degree and institution.
pub fn candidate_corpus(profile: &CandidateProfile) -> String {
    let mut corpus = Corpus::default();

    corpus.push_all(&profile.summary);
    corpus.push_all(profile.skills.iter().map(|skill| &skill.name));
    corpus.push_all(&profile.domains);

    for exp in &profile.experiences {
        corpus.push(&exp.title);
        corpus.push(&exp.company);
        for project in &exp.projects {
            corpus.push_opt(&project.situation);
            corpus.push_opt(&project.task);
            corpus.push_opt(&project.result);
            corpus.push_all(&project.actions);
            corpus.push_all(&project.tech_stack);
            corpus.push_all(&project.domains);
        }
    }

    for edu in &profile.education {
        corpus.push_opt(&edu.degree);
        corpus.push_opt(&edu.institution);
    }

    corpus.finish()
}

pub fn job_corpus(job: &JobPosting) -> String {
    let mut corpus = Corpus::default();
    let requirements = &job.requirements;

    corpus.push(&job.title);
    corpus.push_opt(&job.raw_description);
    corpus.push_all(&job.responsibilities);
    corpus.push_all(&job.soft_skills);
    corpus.push_all(&requirements.must_have_skills);
    corpus.push_all(&requirements.nice_to_have_skills);
    corpus.push_all(&requirements.tools);
    corpus.push_all(&requirements.methodologies);
    corpus.push_all(&requirements.domains);
    for language in &requirements.languages {
        corpus.push(&language.name);
        corpus.push_opt(&language.level);
    }

    corpus.finish()
}

#[derive(Default)]
struct Corpus {
    text: String,
}

impl Corpus {
    fn push(&mut self, value: &str) {
        if value.trim().is_empty() {
            return;
        }
        self.text.push_str(value);
        self.text.push(' ');
    }

    fn push_opt(&mut self, value: &Option<String>) {
        if let Some(value) = value {
            self.push(value);
        }
    }

    fn push_all<'a, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for value in values {
            self.push(value);
        }
    }

    fn finish(self) -> String {
        self.text.trim().to_string()
    }
}
