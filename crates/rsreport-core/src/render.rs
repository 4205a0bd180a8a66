use crate::Result;
use crate::document::Document;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;

/// Template used when the caller does not supply one
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/template.html");

/// `<Month> <Day>, <Year> - <Hour>:<Minute><AM/PM>`
pub const DATE_FORMAT: &str = "%B %d, %Y - %I:%M%p";

/// Project level information shown in the report header
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportMetadata {
    pub title: String,
    pub project_type: String,
    pub metadata: Vec<(String, String)>,
    pub warehouse: Vec<(String, String)>,
}

/// Everything the template gets to see
#[derive(Debug, Clone, Serialize)]
pub struct RenderPayload<'a> {
    pub title: &'a str,
    pub project_type: &'a str,
    pub metadata: &'a [(String, String)],
    pub warehouse: &'a [(String, String)],
    pub date: String,
    pub head: String,
    pub toc: String,
    pub body: String,
    pub footer: &'a str,
}

/// Turns the payload into final markup
pub trait TemplateEngine {
    fn render(&self, payload: &RenderPayload<'_>) -> Result<String>;
}

/// minijinja backed template; markup fields are inserted with `|safe`,
/// everything else is HTML escaped.
#[derive(Debug, Clone)]
pub struct JinjaTemplate {
    source: String,
}

impl Default for JinjaTemplate {
    fn default() -> Self {
        Self::from_source(DEFAULT_TEMPLATE)
    }
}

impl JinjaTemplate {
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::from_source(std::fs::read_to_string(path)?))
    }
}

impl TemplateEngine for JinjaTemplate {
    fn render(&self, payload: &RenderPayload<'_>) -> Result<String> {
        let mut env = minijinja::Environment::new();
        env.add_template("report.html", &self.source)?;
        let template = env.get_template("report.html")?;
        Ok(template.render(minijinja::context! { report => payload })?)
    }
}

/// Final serialization pass over an assembled [`Document`]
pub struct Renderer {
    engine: Box<dyn TemplateEngine>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Box::new(JinjaTemplate::default()))
    }
}

impl Renderer {
    pub fn new(engine: Box<dyn TemplateEngine>) -> Self {
        Self { engine }
    }

    pub fn render(&self, doc: &Document, meta: &ReportMetadata) -> Result<String> {
        self.render_at(doc, meta, Local::now())
    }

    pub fn render_at(
        &self,
        doc: &Document,
        meta: &ReportMetadata,
        now: DateTime<Local>,
    ) -> Result<String> {
        let payload = RenderPayload {
            title: &meta.title,
            project_type: &meta.project_type,
            metadata: &meta.metadata,
            warehouse: &meta.warehouse,
            date: now.format(DATE_FORMAT).to_string(),
            head: style_head(doc.styles()),
            toc: toc_markup(doc),
            body: doc.tree().to_html(),
            footer: doc.footer(),
        };
        self.engine.render(&payload)
    }

    /// Render and write to `path`, replacing any previous artifact
    pub fn write(&self, doc: &Document, meta: &ReportMetadata, path: &Path) -> Result<()> {
        tracing::info!(path = %path.display(), "writing report");
        if path.is_file() {
            std::fs::remove_file(path)?;
        }

        let html = self.render(doc, meta)?;
        std::fs::write(path, html)?;

        tracing::debug!("report writing completed");
        Ok(())
    }
}

fn style_head(styles: &[String]) -> String {
    styles
        .iter()
        .map(|css| format!("<style>\n{}\n</style>", css))
        .collect()
}

/// Empty string when no section was ever created
fn toc_markup(doc: &Document) -> String {
    if doc.toc().is_empty() {
        String::new()
    } else {
        doc.toc().build_tree().to_html()
    }
}
