//! Presentation of generated documents, score reports and batch results

use crate::config::OutputFormat;
use crate::error::{MatchingError, Result};
use crate::matching::ScoreBreakdown;
use crate::model::{GeneratedDocument, TextRelevanceStrategy};
use crate::tailoring::BatchResult;
use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Score breakdown plus the separate text relevance signal for one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub job_id: String,
    pub job_title: String,
    pub breakdown: ScoreBreakdown,
    pub text_relevance_strategy: TextRelevanceStrategy,
    pub text_relevance: f64,
}

pub trait OutputFormatter {
    fn format_document(&self, document: &GeneratedDocument) -> Result<String>;
    fn format_score(&self, report: &ScoreReport) -> Result<String>;
    fn format_batch(&self, result: &BatchResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Coloured terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown and HTML take the renderer's output as-is
pub struct RenderedFormatter {
    format: OutputFormat,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        format!(
            "\n{}\n{}\n",
            self.colorize(title, Color::Blue),
            self.colorize(&"─".repeat(title.chars().count()), Color::Blue)
        )
    }

    fn format_percentage(&self, score: f64) -> String {
        let color = match score {
            s if s >= 0.8 => Color::Green,
            s if s >= 0.6 => Color::Yellow,
            s if s >= 0.4 => Color::BrightYellow,
            _ => Color::Red,
        };
        self.colorize(&format!("{:.1}%", score * 100.0), color)
    }

    fn score_line(&self, label: &str, score: f64) -> String {
        format!("  {:<22} {}\n", label, self.format_percentage(score))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_document(&self, document: &GeneratedDocument) -> Result<String> {
        let meta = &document.meta;
        let details = &meta.matching_details;
        let mut out = String::new();

        out.push_str(&self.format_header(&format!("{} ({})", meta.job_title, meta.job_id)));
        out.push_str(&self.score_line("Overall match", meta.matching_score_overall));
        out.push_str(&self.score_line("Skills coverage", details.skills_coverage));
        out.push_str(&self.score_line("Domain fit", details.domain_fit));
        out.push_str(&self.score_line("Experience relevance", details.experience_relevance));
        out.push_str(&format!(
            "  {:<22} {}\n",
            "Generated",
            self.colorize(&meta.generation_timestamp, Color::BrightBlack)
        ));

        let skills = &document.skills_section.highlighted_skills;
        if !skills.is_empty() {
            out.push_str(&self.format_header("Highlighted skills"));
            out.push_str(&format!("  {}\n", self.colorize(&skills.join(", "), Color::Cyan)));
        }

        if !document.experience_section.is_empty() {
            out.push_str(&self.format_header("Experience"));
            for exp in &document.experience_section {
                out.push_str(&format!(
                    "  {} {} @ {}\n",
                    self.format_percentage(exp.relevance_score),
                    exp.title,
                    exp.company
                ));
                if !exp.tech_stack.is_empty() {
                    out.push_str(&format!(
                        "      {}\n",
                        self.colorize(&exp.tech_stack.join(", "), Color::BrightBlack)
                    ));
                }
            }
        }

        Ok(out)
    }

    fn format_score(&self, report: &ScoreReport) -> Result<String> {
        let b = &report.breakdown;
        let mut out = self.format_header(&format!("{} ({})", report.job_title, report.job_id));

        out.push_str(&self.score_line("Overall match", b.overall));
        out.push_str(&self.score_line("Skills", b.skills));
        out.push_str(&self.score_line("Top experiences", b.experience));
        out.push_str(&self.score_line("Domain fit", b.domain));
        out.push_str(&self.score_line("Years of experience", b.years));
        out.push_str(&self.score_line("Soft skills", b.soft_skills));

        out.push_str(&self.format_header("Text relevance"));
        if report.text_relevance_strategy == TextRelevanceStrategy::Disabled {
            out.push_str(&format!("  {}\n", self.colorize("disabled", Color::BrightBlack)));
        } else {
            out.push_str(&self.score_line(report.text_relevance_strategy.as_str(), report.text_relevance));
        }

        Ok(out)
    }

    fn format_batch(&self, result: &BatchResult) -> Result<String> {
        let mut out = self.format_header("Batch matching");
        out.push_str(&format!(
            "  {} jobs: {} generated, {} below threshold, {} failed\n",
            result.total_jobs,
            self.colorize(&result.generated.to_string(), Color::Green),
            self.colorize(&result.skipped_below_threshold.to_string(), Color::Yellow),
            self.colorize(&result.failed.to_string(), Color::Red),
        ));

        if !result.documents.is_empty() {
            out.push('\n');
            for (rank, doc) in result.documents.iter().enumerate() {
                out.push_str(&format!(
                    "  {:>3}. {} {} ({})\n",
                    rank + 1,
                    self.format_percentage(doc.meta.matching_score_overall),
                    doc.meta.job_title,
                    doc.meta.job_id
                ));
            }
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_document(&self, document: &GeneratedDocument) -> Result<String> {
        self.to_json(document)
    }

    fn format_score(&self, report: &ScoreReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_batch(&self, result: &BatchResult) -> Result<String> {
        self.to_json(result)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl RenderedFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl OutputFormatter for RenderedFormatter {
    fn format_document(&self, document: &GeneratedDocument) -> Result<String> {
        match self.format {
            OutputFormat::Html => document.output.html.clone().ok_or_else(|| {
                MatchingError::Rendering("HTML output was not rendered".to_string())
            }),
            _ => Ok(document.output.markdown.clone()),
        }
    }

    fn format_score(&self, _report: &ScoreReport) -> Result<String> {
        Err(MatchingError::UnsupportedFormat(format!(
            "{:?} is only available for generated documents",
            self.format
        )))
    }

    fn format_batch(&self, result: &BatchResult) -> Result<String> {
        let docs: Result<Vec<String>> = result
            .documents
            .iter()
            .map(|doc| self.format_document(doc))
            .collect();
        Ok(docs?.join("\n\n"))
    }

    fn supports_format(&self) -> OutputFormat {
        self.format
    }
}

pub fn formatter_for(format: OutputFormat, use_colors: bool, pretty_json: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(pretty_json)),
        OutputFormat::Markdown | OutputFormat::Html => Box::new(RenderedFormatter::new(format)),
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, job_id: &str) -> String {
    let base: String = job_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let base = if base.is_empty() { "cv".to_string() } else { base };

    match format {
        OutputFormat::Console => format!("{}_match.txt", base),
        OutputFormat::Json => format!("{}_cv.json", base),
        OutputFormat::Markdown => format!("{}_cv.md", base),
        OutputFormat::Html => format!("{}_cv.html", base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RenderedOutput;

    fn document() -> GeneratedDocument {
        let mut doc = GeneratedDocument::default();
        doc.meta.job_id = "job-1".into();
        doc.meta.job_title = "Backend".into();
        doc.meta.matching_score_overall = 0.795;
        doc.skills_section.highlighted_skills = vec!["Rust".into()];
        doc.output = RenderedOutput {
            markdown: "# Ada\n".into(),
            html: None,
            json: None,
        };
        doc
    }

    #[test]
    fn test_console_document_without_colors() {
        let out = ConsoleFormatter::new(false).format_document(&document()).unwrap();
        assert!(out.contains("Backend (job-1)"));
        assert!(out.contains("Overall match"));
        assert!(out.contains("79.5%"));
        assert!(out.contains("Rust"));
    }

    #[test]
    fn test_console_score_report_marks_disabled_signal() {
        let report = ScoreReport {
            job_id: "job-1".into(),
            job_title: "Backend".into(),
            breakdown: ScoreBreakdown {
                skills: 1.0,
                domain: 0.5,
                years: 1.0,
                soft_skills: 0.5,
                experience: 0.6,
                overall: 0.795,
            },
            text_relevance_strategy: TextRelevanceStrategy::Disabled,
            text_relevance: 0.0,
        };

        let out = ConsoleFormatter::new(false).format_score(&report).unwrap();
        assert!(out.contains("Soft skills"));
        assert!(out.contains("disabled"));
    }

    #[test]
    fn test_rendered_formatter_requires_html() {
        let html = RenderedFormatter::new(OutputFormat::Html).format_document(&document());
        assert!(matches!(html, Err(MatchingError::Rendering(_))));

        let md = RenderedFormatter::new(OutputFormat::Markdown)
            .format_document(&document())
            .unwrap();
        assert_eq!(md, "# Ada\n");
    }

    #[test]
    fn test_json_formatter_selected_by_format() {
        let formatter = formatter_for(OutputFormat::Json, false, false);
        assert_eq!(formatter.supports_format(), OutputFormat::Json);

        let out = formatter.format_document(&document()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["meta"]["job_id"], "job-1");
    }

    #[test]
    fn test_save_and_suggest_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(suggest_filename(&OutputFormat::Markdown, "acme/backend 1"));
        save_report_to_file("# Ada\n", &path).unwrap();

        assert!(path.ends_with("acme_backend_1_cv.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Ada\n");
    }
}
