use crate::config::{DEFAULT_CONFIG_NAME, ReportConfig, SectionConfig, TableConfig};
use anyhow::{Context, Result};
use rsreport_core::{
    Document, Element, JinjaTemplate, NodeId, Renderer, ReportMetadata, Section, TableBuilder,
    print_layer,
};
use rsreport_index::Database;
use rsreport_project::Project;
use std::path::{Path, PathBuf};

/// Inputs of a single `rsreport report` invocation
pub struct ReportRequest<'a> {
    pub database: &'a Path,
    pub output: &'a Path,
    pub project: Option<&'a Path>,
    pub config: Option<&'a Path>,
    pub css: &'a [PathBuf],
}

/// What got written, for the status line
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub output: PathBuf,
    pub title: String,
    pub sections: usize,
    pub layers: usize,
}

pub fn handle(request: &ReportRequest<'_>) -> Result<ReportOutcome> {
    let config = load_definition(request)?;
    let db = Database::open(request.database)?;
    let project = request
        .project
        .map(Project::load)
        .transpose()
        .context("Failed to load project descriptor")?;

    let mut doc = Document::new();
    for css in config.css.iter().chain(request.css) {
        doc.add_css_file(css)
            .with_context(|| format!("Failed to read stylesheet: {}", css.display()))?;
    }
    if let Some(footer) = &config.footer {
        doc.set_footer(footer.as_str());
    }

    let root = doc.root();
    for section in &config.sections {
        build_section(&mut doc, &db, &config, section, root, 1)?;
    }

    let mut layers = 0;
    if let Some(project) = &project
        && config.layers
    {
        layers = project_layers(&mut doc, project);
    }

    let meta = report_metadata(&config, project.as_ref(), request.database);
    let renderer = match &config.template {
        Some(path) => Renderer::new(Box::new(JinjaTemplate::from_file(path).with_context(
            || format!("Failed to read template: {}", path.display()),
        )?)),
        None => Renderer::default(),
    };

    if let Some(parent) = request.output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    renderer
        .write(&doc, &meta, request.output)
        .with_context(|| format!("Failed to write report: {}", request.output.display()))?;

    Ok(ReportOutcome {
        output: request.output.to_path_buf(),
        title: meta.title,
        sections: doc.toc().len(),
        layers,
    })
}

/// Explicit `--config` must exist; the implicit one next to the database may not
fn load_definition(request: &ReportRequest<'_>) -> Result<ReportConfig> {
    match request.config {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Report definition not found: {}", path.display());
            }
            ReportConfig::load_from(path)
        }
        None => {
            let dir = request
                .database
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            ReportConfig::load_from(&dir.join(DEFAULT_CONFIG_NAME))
        }
    }
}

fn build_section(
    doc: &mut Document,
    db: &Database,
    config: &ReportConfig,
    section: &SectionConfig,
    parent: NodeId,
    level: u32,
) -> Result<()> {
    let mut options = match &section.title {
        Some(title) => Section::titled(title.as_str()),
        None => Section::untitled(),
    }
    .parent(parent)
    .level(level);
    if let Some(id) = &section.id {
        options = options.id(id.as_str());
    }
    if let Some(class) = &section.class {
        options = options.attr("class", class.as_str());
    }

    let label = section
        .title
        .as_deref()
        .or(section.id.as_deref())
        .unwrap_or("untitled")
        .to_string();
    let inner = doc.section(options);
    tracing::debug!(section = %label, level, "building section");

    for text in &section.paragraphs {
        doc.paragraph(inner, text);
    }

    for summary in &section.summaries {
        if let Some(title) = &summary.title {
            doc.header(inner, level + 2, title);
        }
        let pairs = db
            .query_pairs(&summary.sql)
            .with_context(|| format!("Summary query failed in section '{}'", label))?;
        match pairs {
            Some(pairs) => {
                let mut table = TableBuilder::new(doc.tree_mut(), inner);
                if let Some(class) = &summary.class {
                    table = table.attr("class", class.as_str());
                }
                table.from_pairs(pairs);
            }
            None => tracing::warn!(section = %label, "summary query returned no rows"),
        }
    }

    for table in &section.tables {
        add_table(doc, db, config, table, inner, level)
            .with_context(|| format!("Table query failed in section '{}'", label))?;
    }

    for stats in &section.stats {
        for column in &stats.columns {
            let summary = db
                .column_summary(&stats.table, column)
                .with_context(|| format!("Statistics failed for {}.{}", stats.table, column))?;
            let wrapper = doc.element(inner, Element::new("div").with_attr("class", "column-stats"));
            doc.header(wrapper, level + 2, column);
            TableBuilder::new(doc.tree_mut(), wrapper).from_pairs(summary);
        }
    }

    for child in &section.sections {
        build_section(doc, db, config, child, inner, level + 1)?;
    }
    Ok(())
}

fn add_table(
    doc: &mut Document,
    db: &Database,
    config: &ReportConfig,
    table: &TableConfig,
    parent: NodeId,
    level: u32,
) -> Result<()> {
    if let Some(title) = &table.title {
        doc.header(parent, level + 2, title);
    }

    let columns: Vec<&str> = table.columns.iter().map(String::as_str).collect();
    let id_columns: Vec<&str> = table
        .id_columns
        .as_ref()
        .unwrap_or(&config.id_columns)
        .iter()
        .map(String::as_str)
        .collect();

    let mut builder = TableBuilder::new(doc.tree_mut(), parent);
    if let Some(class) = &table.class {
        builder = builder.attr("class", class.as_str());
    }
    builder.from_query(&columns, &table.sql, db, &id_columns)?;
    Ok(())
}

/// One "Project Layers" section per realization; returns the layer count
fn project_layers(doc: &mut Document, project: &Project) -> usize {
    let root = doc.root();
    let mut count = 0;

    for realization in &project.realizations {
        if realization.layers.is_empty() {
            tracing::warn!(realization = %realization.name, "realization has no layers");
            continue;
        }

        let mut options = Section::titled("Project Layers")
            .parent(root)
            .attr("class", "realization");
        if let Some(id) = &realization.id {
            options = options.id(format!("Layers-{}", id));
        }
        let inner = doc.section(options);
        doc.header(inner, 3, &realization.name);

        for layer in &realization.layers {
            print_layer(doc, layer, inner, project.project_dir(), 2);
            count += 1;
        }
    }
    count
}

fn report_metadata(
    config: &ReportConfig,
    project: Option<&Project>,
    database: &Path,
) -> ReportMetadata {
    let mut meta = project.map(Project::report_metadata).unwrap_or_default();
    if let Some(title) = &config.title {
        meta.title = title.clone();
    } else if meta.title.is_empty() {
        meta.title = database
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Report".to_string());
    }
    meta
}
