//! Rendering of generated documents into Markdown, HTML and JSON

use super::template::TemplateRegistry;
use crate::error::Result;
use crate::model::{GeneratedDocument, GenerationOptions, RenderedOutput};
use askama::Template;
use pulldown_cmark::{html, Options, Parser};

/// Populates the rendered representations of a document. Implementations
/// never alter the document's section data.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &GeneratedDocument, options: &GenerationOptions) -> Result<RenderedOutput>;
}

/// Markdown is always produced; HTML and JSON only when listed in
/// `output_formats`. Other formats are ignored.
pub struct TemplateRenderer {
    registry: TemplateRegistry,
    include_styles: bool,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.5;
            color: #222;
            max-width: 820px;
            margin: 0 auto;
            padding: 24px;
        }
        h1 { margin-bottom: 0; }
        h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 6px;
        }
        h3 { margin-bottom: 4px; }
        hr { border: 0; border-top: 1px solid #ccc; }
    </style>
    {% endif %}
</head>
<body>
    <main class="cv" data-job-id="{{ job_id }}">
{{ body|safe }}
    </main>
</body>
</html>"#, ext = "html")]
struct CvPage<'a> {
    title: &'a str,
    job_id: &'a str,
    include_styles: bool,
    body: String,
}

impl TemplateRenderer {
    pub fn new(include_styles: bool) -> Self {
        Self {
            registry: TemplateRegistry::new(),
            include_styles,
        }
    }

    fn render_html(&self, document: &GeneratedDocument, markdown: &str) -> Result<String> {
        let mut body = String::new();
        html::push_html(&mut body, Parser::new_ext(markdown, Options::empty()));

        let title = if document.header.name.trim().is_empty() {
            "Curriculum Vitae"
        } else {
            document.header.name.as_str()
        };

        let page = CvPage {
            title,
            job_id: &document.meta.job_id,
            include_styles: self.include_styles,
            body,
        };
        Ok(page.render()?)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DocumentRenderer for TemplateRenderer {
    fn render(&self, document: &GeneratedDocument, options: &GenerationOptions) -> Result<RenderedOutput> {
        let template = self.registry.resolve(options.profile.as_deref());
        let markdown = template.render_markdown(document);

        let html = if options.wants_format("html") {
            Some(self.render_html(document, &markdown)?)
        } else {
            None
        };

        let json = if options.wants_format("json") {
            Some(serde_json::to_string_pretty(&document.without_output())?)
        } else {
            None
        };

        log::debug!(
            "Rendered '{}' with template '{}' (html: {}, json: {})",
            document.meta.job_id,
            template.name(),
            html.is_some(),
            json.is_some()
        );

        Ok(RenderedOutput { markdown, html, json })
    }
}
