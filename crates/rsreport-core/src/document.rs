use crate::Result;
use crate::node::{Element, NodeId, Tree};
use crate::style::{CssBeautifier, StyleFormatter};
use crate::toc::{TOC_ID, TocRegistry};
use std::path::Path;
use uuid::Uuid;

/// Style sheet every report starts with
pub const DEFAULT_CSS: &str = include_str!("../templates/report.css");

/// Options for [`Document::section`].
///
/// ```
/// use rsreport_core::{Document, Section};
///
/// let mut doc = Document::new();
/// let parent = doc.section(Section::titled("Vegetation").id("Vegetation"));
/// let _inner = doc.section(Section::titled("Existing").parent(parent).level(2));
/// assert_eq!(doc.toc().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Section {
    id: Option<String>,
    title: Option<String>,
    parent: Option<NodeId>,
    level: u32,
    attributes: Vec<(String, String)>,
}

impl Section {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::untitled()
        }
    }

    /// A structural section: no heading, invisible in navigation
    pub fn untitled() -> Self {
        Self {
            id: None,
            title: None,
            parent: None,
            level: 1,
            attributes: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }
}

/// Builder context for one report: the body tree, the navigation log and
/// the collected style blocks.
///
/// A `Document` is plain data owned by the code assembling the report; it
/// is not meant to be shared between threads while it is being built.
pub struct Document {
    tree: Tree,
    toc: TocRegistry,
    styles: Vec<String>,
    footer: String,
    style_formatter: Box<dyn StyleFormatter>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty report carrying the default style sheet
    pub fn new() -> Self {
        Self::with_style_formatter(Box::new(CssBeautifier))
    }

    pub fn with_style_formatter(style_formatter: Box<dyn StyleFormatter>) -> Self {
        let mut doc = Self {
            tree: Tree::new(Element::new("main").with_attr("id", "ReportInner")),
            toc: TocRegistry::new(),
            styles: Vec::new(),
            footer: String::new(),
            style_formatter,
        };
        doc.add_style(DEFAULT_CSS);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn toc(&self) -> &TocRegistry {
        &self.toc
    }

    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    pub fn footer(&self) -> &str {
        &self.footer
    }

    pub fn set_footer(&mut self, footer: impl Into<String>) {
        self.footer = footer.into();
    }

    /// Create a section and return its inner content container.
    ///
    /// The section is appended to its parent (or the document root) right
    /// away and always registered in the table of contents; untitled
    /// sections are simply skipped when navigation is built.
    pub fn section(&mut self, section: Section) -> NodeId {
        let Section {
            id,
            title,
            parent,
            level,
            attributes,
        } = section;

        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut element = Element::new("section").with_attr("id", id.as_str());
        let mut class = "report-section".to_string();
        for (key, value) in attributes {
            if key == "class" {
                class = format!("report-section {}", value);
            } else {
                element.set_attr(key, value);
            }
        }
        element.set_attr("class", class);

        let parent = parent.unwrap_or_else(|| self.tree.root());
        let section_node = self.tree.append(parent, element);

        if let Some(title) = title.as_deref() {
            let heading = self.header(section_node, level + 1, title);
            self.tree.append(
                heading,
                Element::new("a")
                    .with_attr("class", "nav-top")
                    .with_attr("href", format!("#{}", TOC_ID))
                    .with_text("Top"),
            );
        }

        let inner = self
            .tree
            .append(section_node, Element::new("div").with_attr("class", "section-inner"));

        self.toc.register(level, title.as_deref(), &id);
        inner
    }

    /// Heading `h{level}` with a fresh id. Not registered in navigation.
    pub fn header(&mut self, parent: NodeId, level: u32, text: &str) -> NodeId {
        self.tree.append(parent, report_header(level, text))
    }

    pub fn paragraph(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.tree.append(parent, Element::new("p").with_text(text))
    }

    /// `ul` (or `ol` when `ordered`) with one `li` per item
    pub fn list<I, S>(&mut self, parent: NodeId, items: I, ordered: bool) -> NodeId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self
            .tree
            .append(parent, Element::new(if ordered { "ol" } else { "ul" }));
        for item in items {
            self.tree.append(list, Element::new("li").with_text(item));
        }
        list
    }

    /// Image wrapped in a `div.imgWrap`
    pub fn image(&mut self, parent: NodeId, src: &str, alt: &str, class: Option<&str>) -> NodeId {
        let wrap = self
            .tree
            .append(parent, Element::new("div").with_attr("class", "imgWrap"));
        let mut img = Element::new("img").with_attr("src", src).with_attr("alt", alt);
        if let Some(class) = class {
            img.set_attr("class", class);
        }
        self.tree.append(wrap, img)
    }

    /// Append arbitrary content
    pub fn element(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.tree.append(parent, element)
    }

    pub fn add_style(&mut self, raw: &str) {
        let formatted = self.style_formatter.format(raw);
        self.styles.push(formatted);
    }

    pub fn add_css_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "adding style sheet");
        self.add_style(&raw);
        Ok(())
    }
}

/// `h{level}.report-header` carrying a fresh uuid id
pub(crate) fn report_header(level: u32, text: &str) -> Element {
    Element::new(format!("h{}", level))
        .with_attr("class", "report-header")
        .with_attr("id", Uuid::new_v4().to_string())
        .with_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Verbatim;

    impl StyleFormatter for Verbatim {
        fn format(&self, raw: &str) -> String {
            raw.to_string()
        }
    }

    #[test]
    fn test_section_structure() {
        let mut doc = Document::new();
        let inner = doc.section(Section::titled("Ownership").id("Ownership"));

        let root = doc.root();
        let section = doc.tree().children(root)[0];
        let el = doc.tree().element(section);
        assert_eq!(el.tag, "section");
        assert_eq!(el.attr("id"), Some("Ownership"));
        assert_eq!(el.attr("class"), Some("report-section"));

        let children = doc.tree().children(section);
        assert_eq!(children.len(), 2);
        let heading = doc.tree().element(children[0]);
        assert_eq!(heading.tag, "h2");
        assert_eq!(heading.text.as_deref(), Some("Ownership"));
        assert_eq!(children[1], inner);
        assert!(doc.tree().element(inner).has_class("section-inner"));

        let top = doc.tree().children(children[0])[0];
        assert_eq!(doc.tree().element(top).attr("href"), Some("#TOC"));
    }

    #[test]
    fn test_untitled_section_has_no_heading_but_is_registered() {
        let mut doc = Document::new();
        doc.section(Section::untitled().level(2));

        let section = doc.tree().children(doc.root())[0];
        assert_eq!(doc.tree().children(section).len(), 1);
        assert_eq!(doc.toc().len(), 1);
        assert_eq!(doc.toc().entries()[0].title, None);
        assert_eq!(doc.toc().entries()[0].level, 2);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut doc = Document::new();
        doc.section(Section::titled("A"));
        doc.section(Section::titled("B"));

        let entries = doc.toc().entries();
        assert_ne!(entries[0].section_id, entries[1].section_id);
        assert!(Uuid::parse_str(&entries[0].section_id).is_ok());
    }

    #[test]
    fn test_class_attribute_is_merged() {
        let mut doc = Document::new();
        doc.section(Section::titled("Layer").attr("class", "rsc-layer").attr("data-kind", "Vector"));

        let section = doc.tree().children(doc.root())[0];
        let el = doc.tree().element(section);
        assert_eq!(el.attr("class"), Some("report-section rsc-layer"));
        assert_eq!(el.attr("data-kind"), Some("Vector"));
    }

    #[test]
    fn test_nested_section_goes_under_parent() {
        let mut doc = Document::new();
        let outer = doc.section(Section::titled("Outer"));
        doc.section(Section::titled("Inner").parent(outer).level(2));

        assert_eq!(doc.tree().children(doc.root()).len(), 1);
        let nested = doc.tree().children(outer)[0];
        let heading = doc.tree().children(nested)[0];
        assert_eq!(doc.tree().element(heading).tag, "h3");
    }

    #[test]
    fn test_styles_keep_registration_order() {
        let mut doc = Document::with_style_formatter(Box::new(Verbatim));
        doc.add_style("a{}");
        doc.add_style("a{}");

        let styles = doc.styles();
        assert_eq!(styles.len(), 3);
        assert_eq!(styles[0], DEFAULT_CSS);
        assert_eq!(styles[1], "a{}");
        assert_eq!(styles[2], "a{}");
    }

    #[test]
    fn test_missing_css_file_is_an_error() {
        let mut doc = Document::new();
        let result = doc.add_css_file(Path::new("/definitely/not/here.css"));
        assert!(result.is_err());
    }

    #[test]
    fn test_list_helper() {
        let mut doc = Document::new();
        let root = doc.root();
        let list = doc.list(root, ["one", "two"], true);

        assert_eq!(doc.tree().element(list).tag, "ol");
        assert_eq!(doc.tree().children(list).len(), 2);
    }
}
