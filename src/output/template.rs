//! Markdown templates for generated documents and the registry that selects them

use crate::model::GeneratedDocument;
use regex::Regex;
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

pub const DEFAULT_TEMPLATE: &str = "default";

const DEFAULT_ALIASES: &[&str] = &[
    "default",
    "general",
    "software_engineer",
    "software_engineer_senior",
    "senior_software_engineer",
    "backend_engineer",
    "frontend_engineer",
    "fullstack_engineer",
    "data_engineer",
    "data_scientist",
    "devops_engineer",
    "cloud_engineer",
    "mobile_engineer",
    "qa_engineer",
    "product_manager",
];

pub trait CvTemplate: Send + Sync {
    fn name(&self) -> &'static str;
    fn render_markdown(&self, document: &GeneratedDocument) -> String;
}

/// Maps normalized profile keys to templates; unknown keys get the default
pub struct TemplateRegistry {
    templates: HashMap<String, Arc<dyn CvTemplate>>,
    default: Arc<dyn CvTemplate>,
    key_separator: Regex,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        let default: Arc<dyn CvTemplate> = Arc::new(DefaultMarkdownTemplate);
        let templates = DEFAULT_ALIASES
            .iter()
            .map(|alias| (alias.to_string(), Arc::clone(&default)))
            .collect();

        Self {
            templates,
            default,
            key_separator: Regex::new(r"[^a-z0-9]+").expect("Invalid key separator regex"),
        }
    }

    pub fn register(&mut self, key: &str, template: Arc<dyn CvTemplate>) {
        let key = self.normalize_key(key);
        self.templates.insert(key, template);
    }

    pub fn resolve(&self, profile: Option<&str>) -> Arc<dyn CvTemplate> {
        let key = profile.map(|p| self.normalize_key(p)).unwrap_or_default();
        match self.templates.get(&key) {
            Some(template) => Arc::clone(template),
            None => {
                if !key.is_empty() {
                    log::debug!("No template registered for '{}', using default", key);
                }
                Arc::clone(&self.default)
            }
        }
    }

    /// Lowercase, runs of non-alphanumerics collapsed to `_`, outer `_` trimmed
    pub fn normalize_key(&self, key: &str) -> String {
        let lowered = key.trim().to_lowercase();
        self.key_separator
            .replace_all(&lowered, "_")
            .trim_matches('_')
            .to_string()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub struct DefaultMarkdownTemplate;

impl CvTemplate for DefaultMarkdownTemplate {
    fn name(&self) -> &'static str {
        DEFAULT_TEMPLATE
    }

    fn render_markdown(&self, document: &GeneratedDocument) -> String {
        let mut md = String::new();
        let header = &document.header;

        let _ = writeln!(md, "# {}", value_or(&header.name, "Candidate"));
        let _ = writeln!(md, "**{}**\n", value_or(&header.title, "Professional"));

        let contact = join_non_blank(
            " | ",
            [
                labeled("Location", header.location.as_deref()),
                labeled("Email", Some(&header.email)),
                labeled("Phone", header.phone.as_deref()),
                labeled("LinkedIn", header.linkedin.as_deref()),
            ],
        );
        if !contact.is_empty() {
            let _ = writeln!(md, "{}", contact);
        }
        md.push_str("\n---\n\n");

        if !document.summary.is_empty() {
            md.push_str("## Summary\n\n");
            for line in &document.summary {
                let _ = writeln!(md, "- {}", line);
            }
            md.push('\n');
        }

        // Always present, even when nothing was highlighted
        md.push_str("## Skills\n\n");
        let _ = writeln!(md, "{}\n", document.skills_section.highlighted_skills.join(" · "));

        if !document.experience_section.is_empty() {
            md.push_str("## Experience\n\n");
            for exp in &document.experience_section {
                let _ = writeln!(
                    md,
                    "### {} · {}",
                    value_or(&exp.title, "Role"),
                    value_or(&exp.company, "Company")
                );

                let period = join_non_blank(" - ", [exp.start.clone(), exp.end.clone()]);
                let timeline = join_non_blank(
                    " · ",
                    [Some(period), labeled("Location", exp.country.as_deref())],
                );
                if !timeline.is_empty() {
                    let _ = writeln!(md, "{}", timeline);
                }
                md.push('\n');
                for bullet in &exp.bullets {
                    let _ = writeln!(md, "- {}", bullet);
                }
                md.push('\n');
            }
        }

        if !document.education_section.is_empty() {
            md.push_str("## Education\n\n");
            for edu in &document.education_section {
                let _ = writeln!(md, "### {}", value_or(edu.degree.as_deref().unwrap_or(""), "Degree"));

                let institution = join_non_blank(", ", [edu.institution.clone(), edu.country.clone()]);
                if !institution.is_empty() {
                    let _ = writeln!(md, "{}", institution);
                }
                let period = join_non_blank(" - ", [edu.start.clone(), edu.end.clone()]);
                if !period.is_empty() {
                    let _ = writeln!(md, "{}", period);
                }
                md.push('\n');
            }
        }

        if !document.languages_section.is_empty() {
            md.push_str("## Languages\n\n");
            for lang in &document.languages_section {
                match lang.level.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
                    Some(level) => {
                        let _ = writeln!(md, "- {}: {}", lang.name, level);
                    }
                    None => {
                        let _ = writeln!(md, "- {}", lang.name);
                    }
                }
            }
        }

        md
    }
}

fn value_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

fn labeled(label: &str, value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| format!("{}: {}", label, v))
}

fn join_non_blank<I>(separator: &str, values: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    values
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EducationSection, ExperienceSection, Header, LanguageSection};

    fn document() -> GeneratedDocument {
        let mut doc = GeneratedDocument::default();
        doc.header = Header {
            name: "Ada Lovelace".into(),
            title: "".into(),
            location: Some("London".into()),
            email: "ada@example.com".into(),
            ..Header::default()
        };
        doc.summary = vec!["Analytical engine pioneer".into()];
        doc.skills_section.highlighted_skills = vec!["Rust".into(), "Kafka".into()];
        doc.experience_section = vec![ExperienceSection {
            company: "Acme".into(),
            title: "Engineer".into(),
            start: Some("2020-01".into()),
            end: Some("present".into()),
            country: Some("UK".into()),
            bullets: vec!["Built things".into()],
            ..ExperienceSection::default()
        }];
        doc.education_section = vec![EducationSection {
            institution: Some("Cambridge".into()),
            ..EducationSection::default()
        }];
        doc.languages_section = vec![LanguageSection {
            name: "English".into(),
            level: Some("native".into()),
        }];
        doc
    }

    #[test]
    fn test_default_template_layout() {
        let md = DefaultMarkdownTemplate.render_markdown(&document());

        assert!(md.starts_with("# Ada Lovelace\n**Professional**\n\n"));
        assert!(md.contains("Location: London | Email: ada@example.com\n\n---\n\n"));
        assert!(md.contains("## Summary\n\n- Analytical engine pioneer\n"));
        assert!(md.contains("---\n\n## Summary\n"));
        assert!(md.contains("\n## Skills\n\nRust · Kafka\n\n## Experience\n"));
        assert!(md.contains("### Engineer · Acme\n2020-01 - present · Location: UK\n\n- Built things\n"));
        assert!(md.contains("### Degree\nCambridge\n"));
        assert!(md.ends_with("- English: native\n"));
    }

    #[test]
    fn test_empty_document_uses_fallbacks() {
        let md = DefaultMarkdownTemplate.render_markdown(&GeneratedDocument::default());
        assert_eq!(md, "# Candidate\n**Professional**\n\n\n---\n\n## Skills\n\n\n\n");
    }

    #[test]
    fn test_registry_normalizes_keys() {
        let registry = TemplateRegistry::new();
        assert_eq!(registry.normalize_key("  Software Engineer (Senior) "), "software_engineer_senior");
        assert_eq!(registry.normalize_key("--Data-Scientist--"), "data_scientist");
        assert_eq!(registry.normalize_key("!!"), "");
    }

    #[test]
    fn test_registry_resolves_aliases_and_unknown_keys() {
        struct Compact;
        impl CvTemplate for Compact {
            fn name(&self) -> &'static str {
                "compact"
            }
            fn render_markdown(&self, document: &GeneratedDocument) -> String {
                document.header.name.clone()
            }
        }

        let mut registry = TemplateRegistry::new();
        assert_eq!(registry.resolve(Some("Backend Engineer")).name(), DEFAULT_TEMPLATE);
        assert_eq!(registry.resolve(Some("astronaut")).name(), DEFAULT_TEMPLATE);
        assert_eq!(registry.resolve(None).name(), DEFAULT_TEMPLATE);

        registry.register("Compact One-Pager", Arc::new(Compact));
        assert_eq!(registry.resolve(Some("compact one pager")).name(), "compact");
    }
}
