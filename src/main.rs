//! ats-match: score candidate profiles against job postings and generate tailored CVs

use ats_matching_engine::cli::{self, Cli, Commands, ConfigAction};
use ats_matching_engine::config::{Config, OutputFormat};
use ats_matching_engine::error::{MatchingError, Result};
use ats_matching_engine::input::InputLoader;
use ats_matching_engine::matching::MatchingEngine;
use ats_matching_engine::model::{GenerationOptions, TextRelevanceStrategy};
use ats_matching_engine::output::{
    formatter_for, save_report_to_file, suggest_filename, OutputFormatter, ScoreReport,
};
use ats_matching_engine::tailoring::{BatchMatcher, CvGenerator, ThresholdPolicy};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

const INPUT_EXTENSIONS: &[&str] = &["json", "toml"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    let loader = InputLoader::new();

    match command {
        Commands::Generate {
            profile,
            job,
            options,
            tailored,
            output,
            save,
        } => {
            validate_input(&profile, "Profile")?;
            validate_input(&job, "Job posting")?;
            let format = parse_format(output.as_deref(), &config)?;

            let profile = loader.load_profile(&profile).await?;
            let job = loader.load_job(&job).await?;
            let mut options = load_options(&loader, options.as_deref(), &config).await?;
            request_rendered_format(&mut options, format);

            let engine = MatchingEngine::new(&config);
            let document = if tailored {
                CvGenerator::new(engine).generate(&profile, &job, &options)
            } else {
                engine.generate(&profile, &job, &options)
            };

            let rendered = formatter_for(format, config.output.color_output, config.output.pretty_json)
                .format_document(&document)?;
            emit(&rendered, save, format, &document.meta.job_id)?;
        }

        Commands::Score {
            profile,
            job,
            strategy,
            output,
        } => {
            validate_input(&profile, "Profile")?;
            validate_input(&job, "Job posting")?;
            let format = parse_format(output.as_deref(), &config)?;

            let profile = loader.load_profile(&profile).await?;
            let job = loader.load_job(&job).await?;

            let strategy = match strategy.as_deref() {
                Some(value) => TextRelevanceStrategy::from_option(Some(value)),
                None => config.generation.default_options.text_relevance_strategy,
            };

            let engine = MatchingEngine::new(&config);
            let report = ScoreReport {
                job_id: job.id.clone(),
                job_title: job.title.clone(),
                breakdown: engine.breakdown(&profile, &job),
                text_relevance_strategy: strategy,
                text_relevance: engine.text_relevance(&profile, &job, strategy),
            };

            let rendered = formatter_for(format, config.output.color_output, config.output.pretty_json)
                .format_score(&report)?;
            println!("{}", rendered);
        }

        Commands::Batch {
            profile,
            jobs,
            options,
            limit,
            threshold,
            output,
            save,
        } => {
            validate_input(&profile, "Profile")?;
            let format = parse_format(output.as_deref(), &config)?;

            let profile = loader.load_profile(&profile).await?;
            let loaded = loader.load_jobs_dir(&jobs).await?;
            let mut options = load_options(&loader, options.as_deref(), &config).await?;
            if threshold.is_some() {
                options.relevance_threshold = threshold;
            }
            request_rendered_format(&mut options, format);

            let policy = ThresholdPolicy::from_options(&options, &config.generation);
            let limit = limit.unwrap_or(config.generation.batch_limit);
            info!(
                "Matching {} job postings (limit {}, threshold {:.2})",
                loaded.jobs.len(),
                BatchMatcher::bounded_limit(limit),
                policy.min_score
            );

            let spinner = spinner("Generating tailored documents...");
            let matcher = BatchMatcher::new(CvGenerator::new(MatchingEngine::new(&config)), policy);
            let mut result = matcher.run(&profile, loaded.jobs, &options, limit).await;
            spinner.finish_and_clear();

            result.failed += loaded.failures.len();
            result.total_jobs += loaded.failures.len();

            let rendered = formatter_for(format, config.output.color_output, config.output.pretty_json)
                .format_batch(&result)?;
            emit(&rendered, save, format, "batch")?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    MatchingError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("Configuration ({})\n", Config::config_path().display());
                println!("{}", content);
            }
            Some(ConfigAction::Reset) => {
                Config::default().save()?;
                println!("Configuration reset to defaults: {}", Config::config_path().display());
            }
            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

fn validate_input(path: &Path, label: &str) -> Result<()> {
    cli::validate_file_extension(path, INPUT_EXTENSIONS)
        .map_err(|e| MatchingError::InvalidInput(format!("{} file: {}", label, e)))
}

fn parse_format(output: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match output {
        Some(output) => cli::parse_output_format(output).map_err(MatchingError::InvalidInput),
        None => Ok(config.output.format),
    }
}

async fn load_options(
    loader: &InputLoader,
    path: Option<&Path>,
    config: &Config,
) -> Result<GenerationOptions> {
    match path {
        Some(path) => {
            validate_input(path, "Options")?;
            loader.load_options(path).await
        }
        None => Ok(config.generation.default_options.clone()),
    }
}

/// The renderer only produces HTML when the options list it
fn request_rendered_format(options: &mut GenerationOptions, format: OutputFormat) {
    if format == OutputFormat::Html && !options.wants_format("html") {
        options.output_formats.push("html".to_string());
    }
}

fn emit(content: &str, save: Option<PathBuf>, format: OutputFormat, job_id: &str) -> Result<()> {
    match save {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(suggest_filename(&format, job_id))
            } else {
                path
            };
            save_report_to_file(content, &path)?;
            println!("Saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
