use crate::document::{Document, Section};
use crate::format::CellValue;
use crate::node::{Element, NodeId};
use crate::table::TableBuilder;
use std::path::Path;

const SIZE_UNITS: [&str; 8] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi"];

/// A named data artifact in a project, possibly containing nested layers
/// (a geopackage and its feature classes, for example).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerDescriptor {
    /// Element kind, e.g. `Vector`, `Raster`, `Geopackage`
    pub kind: String,
    pub name: String,
    /// Path relative to the enclosing layer (or the project root)
    pub path: String,
    pub metadata: Option<Vec<(String, CellValue)>>,
    pub children: Option<Vec<LayerDescriptor>>,
}

impl LayerDescriptor {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            path: path.into(),
            metadata: None,
            children: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Vec<(String, CellValue)>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_children(mut self, children: Vec<LayerDescriptor>) -> Self {
        self.children = Some(children);
        self
    }
}

/// Render `layer` (and, recursively, its children) as nested sections.
///
/// A referenced file that does not exist is reported with size zero; it
/// never fails the report.
pub fn print_layer(
    doc: &mut Document,
    layer: &LayerDescriptor,
    parent: NodeId,
    project_root: &Path,
    level: u32,
) {
    let section = doc.section(
        Section::titled(format!("{}: {}", layer.kind, layer.name))
            .parent(parent)
            .level(level)
            .attr("class", "rsc-layer"),
    );

    if let Some(metadata) = &layer.metadata {
        TableBuilder::new(doc.tree_mut(), section)
            .attr("class", "fullwidth")
            .from_pairs(metadata.iter().map(|(k, v)| (k.as_str(), v.clone())));
    }

    let layer_path = project_root.join(&layer.path);
    let size = file_size(&layer_path);

    if let Some(children) = &layer.children {
        let container = doc.element(
            section,
            Element::new("div").with_attr("class", "inner-layer-container"),
        );
        doc.header(container, level + 1, "Layers");
        for child in children {
            print_layer(doc, child, container, &layer_path, level + 1);
        }
    }

    let footer = doc.element(
        section,
        Element::new("div").with_attr("class", "layer-footer"),
    );
    doc.element(
        footer,
        Element::new("pre")
            .with_attr("class", "path")
            .with_text(format!(
                "Project path: {}  ({})",
                layer.path,
                human_size(size)
            )),
    );
}

fn file_size(path: &Path) -> u64 {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta.len(),
        _ => {
            tracing::warn!(path = %path.display(), "layer file not found, reporting size 0");
            0
        }
    }
}

/// 1024-based size with one decimal, e.g. `0.0 B`, `2.0 KiB`, `1.5 MiB`
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in SIZE_UNITS {
        if value.abs() < 1024.0 {
            return format!("{:.1} {}B", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1} YiB", value)
}
