//! Plain data model shared by scoring, tailoring and rendering

pub mod generated;
pub mod job;
pub mod options;
pub mod profile;

pub use generated::{
    EducationSection, ExperienceSection, GeneratedDocument, Header, LanguageSection,
    MatchingDetails, Meta, RenderedOutput, SkillsSection, ALL_SKILLS_GROUP,
};
pub use job::{JobPosting, LanguageRequirement, Requirements};
pub use options::{GenerationOptions, TextRelevanceStrategy};
pub use profile::{
    CandidateProfile, Certification, Education, Experience, Language, Project, Skill,
};

pub type CvMaster = CandidateProfile;
pub type Job = JobPosting;
pub type CvGenerated = GeneratedDocument;
