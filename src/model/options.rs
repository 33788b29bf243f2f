//! Per-call generation options

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// en | pt
    pub language: Option<String>,
    pub max_experiences: Option<i32>,
    pub include_only_relevant_experiences: bool,
    pub relevance_threshold: Option<f64>,
    pub output_formats: Vec<String>,
    pub section_order: Vec<String>,
    /// Template selector, e.g. `software_engineer_senior`
    pub profile: Option<String>,
    pub text_relevance_strategy: TextRelevanceStrategy,
}

impl GenerationOptions {
    pub fn wants_format(&self, format: &str) -> bool {
        self.output_formats
            .iter()
            .any(|f| f.trim().eq_ignore_ascii_case(format))
    }
}

/// Similarity used by the optional text relevance signal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextRelevanceStrategy {
    #[default]
    Bm25,
    TfIdf,
    Disabled,
}

impl TextRelevanceStrategy {
    /// Parses a free-text option. Blank, absent and unrecognised values select BM25.
    pub fn from_option(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::Bm25;
        };

        match value.trim().to_uppercase().as_str() {
            "TFIDF" | "TF_IDF" | "TF-IDF" => Self::TfIdf,
            "NONE" | "OFF" | "DISABLED" => Self::Disabled,
            _ => Self::Bm25,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bm25 => "BM25",
            Self::TfIdf => "TFIDF",
            Self::Disabled => "NONE",
        }
    }
}

impl fmt::Display for TextRelevanceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TextRelevanceStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TextRelevanceStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_option(raw.as_deref()))
    }
}
