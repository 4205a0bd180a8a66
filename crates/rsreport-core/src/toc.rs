//! Table of contents bookkeeping.
//!
//! Sections register `(level, title, id)` in creation order. The navigation
//! tree is rebuilt from that flat log on demand with a stack of open `ol`
//! containers, so nesting only depends on the order and levels of the
//! registrations, never on where the sections ended up in the body.

use crate::document::report_header;
use crate::node::{Element, NodeId, Tree};

/// Anchor id of the navigation wrapper; section headings link back to it
pub const TOC_ID: &str = "TOC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub level: u32,
    /// `None` marks a structural section that never shows up in navigation
    pub title: Option<String>,
    pub section_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct TocRegistry {
    entries: Vec<TocEntry>,
}

impl TocRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Levels are 1-based. Registering level 0 is a caller error; it is
    /// treated as level 1 when the tree is built.
    pub fn register(&mut self, level: u32, title: Option<&str>, section_id: &str) {
        self.entries.push(TocEntry {
            level,
            title: title.map(str::to_string),
            section_id: section_id.to_string(),
        });
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuild the nested navigation: `nav#TOC > h3 + ol.level-1 > (li | ol)*`.
    ///
    /// When a level jumps by more than one, every skipped level gets its own
    /// (empty) `ol` so the item still lands at its declared depth.
    pub fn build_tree(&self) -> Tree {
        let mut tree = Tree::new(Element::new("nav").with_attr("id", TOC_ID));
        let nav = tree.root();
        tree.append(nav, report_header(3, "Table of Contents"));

        let top = tree.append(nav, level_list(1));
        let mut parents: Vec<NodeId> = vec![top];

        for entry in &self.entries {
            let Some(title) = entry.title.as_deref() else {
                continue;
            };
            let level = entry.level.max(1) as usize;

            if level > parents.len() {
                for _ in 0..level - parents.len() {
                    let current = parents[parents.len() - 1];
                    let nested = tree.append(current, level_list(level));
                    parents.push(nested);
                }
            } else if level < parents.len() {
                parents.truncate(level);
            }

            let current = parents[parents.len() - 1];
            let li = tree.append(current, Element::new("li"));
            tree.append(
                li,
                Element::new("a")
                    .with_attr("href", format!("#{}", entry.section_id))
                    .with_text(title),
            );
        }

        tree
    }
}

fn level_list(level: usize) -> Element {
    Element::new("ol").with_attr("class", format!("level-{}", level))
}
