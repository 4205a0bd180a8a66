use crate::error::{Error, Result};
use roxmltree::Node;
use rsreport_core::{CellValue, LayerDescriptor, ReportMetadata};
use std::path::{Path, PathBuf};

/// Realization children that hold layers, in report order
pub const LAYER_GROUPS: [&str; 4] = ["Inputs", "Intermediates", "Outputs", "Analyses"];

/// One run of a model inside a project
#[derive(Debug, Clone, PartialEq)]
pub struct Realization {
    /// Element name, e.g. `BRAT` or `RSContext`
    pub kind: String,
    pub id: Option<String>,
    pub name: String,
    pub layers: Vec<LayerDescriptor>,
}

/// A loaded project descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    pub project_type: String,
    pub metadata: Vec<(String, String)>,
    pub warehouse: Vec<(String, String)>,
    pub realizations: Vec<Realization>,
    project_dir: PathBuf,
}

impl Project {
    /// Load a descriptor from disk; layer paths resolve against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let xml =
            std::fs::read_to_string(path).map_err(|err| Error::Io(path.to_path_buf(), err))?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let project = Self::parse(&xml, dir)?;
        tracing::debug!(
            name = %project.name,
            realizations = project.realizations.len(),
            "loaded project"
        );
        Ok(project)
    }

    pub fn parse(xml: &str, project_dir: impl Into<PathBuf>) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        let root = doc.root_element();
        if root.tag_name().name() != "Project" {
            return Err(Error::Missing("Project".to_string()));
        }

        let name = child_text(root, "Name").ok_or_else(|| Error::Missing("Name".to_string()))?;
        let project_type = child_text(root, "ProjectType")
            .ok_or_else(|| Error::Missing("ProjectType".to_string()))?;

        let realizations = child(root, "Realizations")
            .map(|el| elements(el).map(realization).collect())
            .unwrap_or_default();

        Ok(Self {
            name,
            project_type,
            metadata: child(root, "MetaData").map(meta_pairs).unwrap_or_default(),
            warehouse: child(root, "Warehouse").map(meta_pairs).unwrap_or_default(),
            realizations,
            project_dir: project_dir.into(),
        })
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Header information for the rendered report
    pub fn report_metadata(&self) -> ReportMetadata {
        ReportMetadata {
            title: self.name.clone(),
            project_type: self.project_type.clone(),
            metadata: self.metadata.clone(),
            warehouse: self.warehouse.clone(),
        }
    }
}

fn realization(node: Node<'_, '_>) -> Realization {
    let kind = node.tag_name().name().to_string();
    let id = node.attribute("id").map(str::to_string);
    let name = child_text(node, "Name")
        .or_else(|| id.clone())
        .unwrap_or_else(|| kind.clone());

    let layers = LAYER_GROUPS
        .iter()
        .filter_map(|group| child(node, group))
        .flat_map(elements)
        .filter_map(layer)
        .collect();

    Realization {
        kind,
        id,
        name,
        layers,
    }
}

/// A layer needs a `Path`; anything without one is skipped
fn layer(node: Node<'_, '_>) -> Option<LayerDescriptor> {
    let kind = node.tag_name().name();
    let Some(path) = child_text(node, "Path") else {
        tracing::warn!(kind, id = ?node.attribute("id"), "skipping layer without <Path>");
        return None;
    };

    let name = child_text(node, "Name")
        .or_else(|| node.attribute("id").map(str::to_string))
        .unwrap_or_else(|| kind.to_string());

    let mut descriptor = LayerDescriptor::new(kind, name, path);
    if let Some(meta) = child(node, "MetaData") {
        descriptor = descriptor.with_metadata(
            meta_pairs(meta)
                .into_iter()
                .map(|(k, v)| (k, CellValue::Text(v)))
                .collect(),
        );
    }
    if let Some(layers) = child(node, "Layers") {
        descriptor = descriptor.with_children(elements(layers).filter_map(layer).collect());
    }
    Some(descriptor)
}

/// `<Meta name="...">value</Meta>` children, in document order
fn meta_pairs(node: Node<'_, '_>) -> Vec<(String, String)> {
    elements(node)
        .filter(|el| el.tag_name().name() == "Meta")
        .filter_map(|el| {
            let key = el.attribute("name")?;
            Some((key.to_string(), el.text().unwrap_or_default().trim().to_string()))
        })
        .collect()
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    elements(node).find(|el| el.tag_name().name() == tag)
}

fn child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child(node, tag)
        .and_then(|el| el.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
