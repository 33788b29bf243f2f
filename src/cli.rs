//! CLI interface for the ATS matching engine

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ats-match")]
#[command(about = "Deterministic candidate/job matching and tailored CV generation")]
#[command(long_about = "Score a structured candidate profile against job postings, generate job-tailored CV documents in Markdown, HTML and JSON, and rank a whole directory of postings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a CV document for one job
    Generate {
        /// Path to the candidate profile (JSON, TOML)
        #[arg(short, long)]
        profile: PathBuf,

        /// Path to the job posting (JSON, TOML)
        #[arg(short, long)]
        job: PathBuf,

        /// Path to generation options (JSON, TOML)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Focus the summary and order skills by requirement tier
        #[arg(short, long)]
        tailored: bool,

        /// Output format: console, json, markdown, html (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show the score breakdown and text relevance for one job
    Score {
        /// Path to the candidate profile (JSON, TOML)
        #[arg(short, long)]
        profile: PathBuf,

        /// Path to the job posting (JSON, TOML)
        #[arg(short, long)]
        job: PathBuf,

        /// Text relevance strategy: bm25, tfidf, none
        #[arg(long)]
        strategy: Option<String>,

        /// Output format: console, json (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate tailored documents for every job posting in a directory
    Batch {
        /// Path to the candidate profile (JSON, TOML)
        #[arg(short, long)]
        profile: PathBuf,

        /// Directory containing job postings (JSON, TOML)
        #[arg(short, long)]
        jobs: PathBuf,

        /// Path to generation options (JSON, TOML)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Maximum number of jobs to process (1-500)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Minimum overall score a document needs to be kept
        #[arg(long)]
        threshold: Option<f64>,

        /// Output format: console, json, markdown, html (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Reset configuration to defaults
    Reset,
    /// Print the configuration file location
    Path,
}

/// Parse output format from string
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Valid options: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| format!("File has no extension: {}", path.display()))?;

    if allowed_extensions.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(format!(
            "Unsupported file extension: {}. Allowed: {}",
            extension,
            allowed_extensions.join(", ")
        ))
    }
}
