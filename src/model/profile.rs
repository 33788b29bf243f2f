//! Candidate profile: the master record every tailored document is built from

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    pub name: String,
    pub title: String,
    pub nationalities: Vec<String>,
    pub phone: Option<String>,
    pub email: String,
    pub linkedin: Option<String>,
    pub location: Option<String>,
    pub summary: Vec<String>,
    pub certifications: Vec<Certification>,
    pub skills: Vec<Skill>,
    pub domains: Vec<String>,
    pub languages: Vec<Language>,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub url: Option<String>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    pub versions: Vec<String>,
    /// beginner | intermediate | advanced | expert
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub name: String,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub country: Option<String>,
    pub title: String,
    /// `yyyy-MM`
    pub start: Option<String>,
    /// `yyyy-MM` or `present`
    pub end: Option<String>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: Option<String>,
    pub period: Option<String>,
    pub situation: Option<String>,
    pub task: Option<String>,
    pub actions: Vec<String>,
    pub result: Option<String>,
    pub tech_stack: Vec<String>,
    pub team_size: Option<String>,
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub country: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl CandidateProfile {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills
            .extend(skills.into_iter().map(|name| Skill::named(name)));
        self
    }

    pub fn with_experience(mut self, experience: Experience) -> Self {
        self.experiences.push(experience);
        self
    }
}

impl Skill {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Experience {
    pub fn new(company: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn period(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    pub fn tech_stack(&self) -> impl Iterator<Item = &String> {
        self.projects.iter().flat_map(|p| p.tech_stack.iter())
    }

    pub fn domains(&self) -> impl Iterator<Item = &String> {
        self.projects.iter().flat_map(|p| p.domains.iter())
    }
}

impl Project {
    pub fn with_tech_stack<I, S>(tech: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tech_stack: tech.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Narrative text fields in a fixed order: situation, task, result, then actions
    pub fn narrative(&self) -> impl Iterator<Item = &str> {
        self.situation
            .as_deref()
            .into_iter()
            .chain(self.task.as_deref())
            .chain(self.result.as_deref())
            .chain(self.actions.iter().map(String::as_str))
    }
}
