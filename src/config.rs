//! Configuration management for the matching engine

use crate::error::{MatchingError, Result};
use crate::model::GenerationOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub generation: GenerationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub overall: OverallWeights,
    pub skill_tiers: SkillTierWeights,
    pub experience: ExperienceWeights,
    pub recency: RecencyConfig,
    /// How many of the best-scoring experiences feed the overall score
    pub top_experiences: usize,
    /// Returned by domain and soft-skill scoring when the job states nothing
    pub neutral_score: f64,
}

/// Weights of the five sub-scores in the overall match score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallWeights {
    pub skills: f64,
    pub experience: f64,
    pub domain: f64,
    pub years: f64,
    pub soft_skills: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillTierWeights {
    pub must_have: f64,
    pub nice_to_have: f64,
    pub tools: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceWeights {
    pub skill: f64,
    pub domain: f64,
    pub recency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecencyConfig {
    /// Years after which an experience sits at the floor
    pub horizon_years: f64,
    pub floor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub default_options: GenerationOptions,
    /// Caller-side acceptance threshold for batch and single-job matching
    pub min_match_score: f64,
    pub batch_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            overall: OverallWeights {
                skills: 0.45,
                experience: 0.20,
                domain: 0.10,
                years: 0.10,
                soft_skills: 0.15,
            },
            skill_tiers: SkillTierWeights {
                must_have: 0.6,
                nice_to_have: 0.25,
                tools: 0.15,
            },
            experience: ExperienceWeights {
                skill: 0.6,
                domain: 0.2,
                recency: 0.2,
            },
            recency: RecencyConfig {
                horizon_years: 5.0,
                floor: 0.2,
            },
            top_experiences: 3,
            neutral_score: 0.5,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_options: GenerationOptions::default(),
            min_match_score: 0.6,
            batch_limit: 100,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl OverallWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.domain + self.years + self.soft_skills
    }
}

impl SkillTierWeights {
    pub fn sum(&self) -> f64 {
        self.must_have + self.nice_to_have + self.tools
    }
}

impl ExperienceWeights {
    pub fn sum(&self) -> f64 {
        self.skill + self.domain + self.recency
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatchingError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-matching-engine")
            .join("config.toml")
    }

    /// Weight groups must each sum to 1.0 so the overall score stays in [0, 1]
    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;

        check_weight_sum("scoring.overall", scoring.overall.sum())?;
        check_weight_sum("scoring.skill_tiers", scoring.skill_tiers.sum())?;
        check_weight_sum("scoring.experience", scoring.experience.sum())?;

        check_unit_interval("scoring.neutral_score", scoring.neutral_score)?;
        check_unit_interval("scoring.recency.floor", scoring.recency.floor)?;
        check_unit_interval("generation.min_match_score", self.generation.min_match_score)?;

        if scoring.recency.horizon_years <= 0.0 {
            return Err(MatchingError::Configuration(
                "scoring.recency.horizon_years must be positive".to_string(),
            ));
        }
        if scoring.top_experiences == 0 {
            return Err(MatchingError::Configuration(
                "scoring.top_experiences must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_weight_sum(name: &str, sum: f64) -> Result<()> {
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(MatchingError::Configuration(format!(
            "{} weights must sum to 1.0, got {:.4}",
            name, sum
        )));
    }
    Ok(())
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MatchingError::Configuration(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}
