//! Output: document templates, rendering and CLI presentation

pub mod formatter;
pub mod renderer;
pub mod template;

pub use formatter::{formatter_for, save_report_to_file, suggest_filename, OutputFormatter, ScoreReport};
pub use renderer::{DocumentRenderer, TemplateRenderer};
pub use template::{CvTemplate, DefaultMarkdownTemplate, TemplateRegistry};
