//! Job posting as supplied by the ingestion pipeline

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub location: Option<String>,
    /// junior | mid | senior | lead | principal
    pub seniority: Option<String>,
    pub raw_description: Option<String>,
    pub requirements: Requirements,
    pub responsibilities: Vec<String>,
    pub soft_skills: Vec<String>,
}

/// Tokenized requirement lists. Absent lists deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirements {
    /// `None` or `Some(0)` means no requirement
    pub years_of_experience: Option<u32>,
    pub must_have_skills: Vec<String>,
    pub nice_to_have_skills: Vec<String>,
    pub tools: Vec<String>,
    pub methodologies: Vec<String>,
    pub domains: Vec<String>,
    pub languages: Vec<LanguageRequirement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageRequirement {
    pub name: String,
    pub level: Option<String>,
}

impl JobPosting {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Requirements {
    /// Must-have, nice-to-have and tools concatenated in that order, duplicates kept
    pub fn all_skill_tokens(&self) -> Vec<String> {
        self.must_have_skills
            .iter()
            .chain(self.nice_to_have_skills.iter())
            .chain(self.tools.iter())
            .cloned()
            .collect()
    }

    pub fn required_years(&self) -> Option<u32> {
        self.years_of_experience.filter(|years| *years > 0)
    }
}
