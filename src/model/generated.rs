//! The tailored document produced for one profile/job pair

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedDocument {
    pub meta: Meta,
    pub header: Header,
    pub summary: Vec<String>,
    pub skills_section: SkillsSection,
    pub experience_section: Vec<ExperienceSection>,
    pub education_section: Vec<EducationSection>,
    pub languages_section: Vec<LanguageSection>,
    #[serde(skip_serializing_if = "RenderedOutput::is_empty")]
    pub output: RenderedOutput,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub job_id: String,
    pub job_title: String,
    /// Reference date, `yyyy-MM-dd`
    pub generation_timestamp: String,
    pub matching_score_overall: f64,
    pub matching_details: MatchingDetails,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingDetails {
    pub skills_coverage: f64,
    pub domain_fit: f64,
    pub experience_relevance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    pub name: String,
    pub title: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub email: String,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsSection {
    pub highlighted_skills: Vec<String>,
    pub skills_grouped: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceSection {
    pub company: String,
    pub country: Option<String>,
    pub title: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub relevance_score: f64,
    pub bullets: Vec<String>,
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationSection {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub country: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSection {
    pub name: String,
    pub level: Option<String>,
}

/// Rendered representations; populated by a [`crate::output::DocumentRenderer`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderedOutput {
    pub markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
}

pub const ALL_SKILLS_GROUP: &str = "all";

impl RenderedOutput {
    pub fn is_empty(&self) -> bool {
        self.markdown.is_empty() && self.html.is_none() && self.json.is_none()
    }
}

impl GeneratedDocument {
    pub fn overall_score(&self) -> f64 {
        self.meta.matching_score_overall
    }

    /// The document without rendered output; serializes with no `output` key
    pub fn without_output(&self) -> Self {
        Self {
            output: RenderedOutput::default(),
            ..self.clone()
        }
    }
}
