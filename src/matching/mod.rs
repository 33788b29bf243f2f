//! Matching and relevance scoring between candidate profiles and job postings

pub mod dates;
pub mod domain;
pub mod engine;
pub mod experience;
pub mod scoring;
pub mod sections;
pub mod skills;
pub mod soft_skills;

pub use dates::{ReferenceClock, RecencyDecay, YearMonth};
pub use domain::DomainScorer;
pub use engine::MatchingEngine;
pub use experience::ExperienceScorer;
pub use scoring::{MatchingScoringService, ScoreBreakdown};
pub use sections::{rank_skills, CvSectionsBuilder};
pub use soft_skills::SoftSkillScorer;
