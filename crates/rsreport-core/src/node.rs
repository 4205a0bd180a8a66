//! Arena-backed element tree used for the report body and the table of contents.
//!
//! Children are owned by exactly one parent and referenced through [`NodeId`].
//! There are no parent pointers; cross references inside the document (such as
//! the "Top" link of a section heading) are textual anchors.

use std::fmt::Write;

/// Handle to an element stored in a [`Tree`].
///
/// A `NodeId` is only meaningful for the tree that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &["area", "br", "col", "hr", "img", "input", "link", "meta"];

/// A single markup element: tag, ordered attributes and optional text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    attributes: Vec<(String, String)>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn with_attrs<I, K, V>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in attrs {
            self.set_attr(key, value);
        }
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set an attribute. Keys are unique: an existing key keeps its position
    /// and has its value replaced.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when the space separated `class` attribute contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    element: Element,
    children: Vec<NodeId>,
}

/// An append-only tree of [`Element`]s with a single root.
#[derive(Debug, Clone)]
pub struct Tree {
    slots: Vec<Slot>,
}

impl Tree {
    pub fn new(root: Element) -> Self {
        Self {
            slots: vec![Slot {
                element: root,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append `element` as the last child of `parent` and return its handle.
    ///
    /// # Panics
    /// Panics if `parent` was produced by a different tree.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            element,
            children: Vec::new(),
        });
        self.slots[parent.0].children.push(id);
        id
    }

    /// Move every element of `other` under `parent`, preserving its shape.
    /// Returns the handle of `other`'s former root.
    pub fn graft(&mut self, parent: NodeId, other: Tree) -> NodeId {
        let offset = self.slots.len();
        let grafted_root = NodeId(offset);
        for slot in other.slots {
            let children = slot
                .children
                .into_iter()
                .map(|child| NodeId(child.0 + offset))
                .collect();
            self.slots.push(Slot {
                element: slot.element,
                children,
            });
        }
        self.slots[parent.0].children.push(grafted_root);
        grafted_root
    }

    pub fn element(&self, id: NodeId) -> &Element {
        &self.slots[id.0].element
    }

    pub fn element_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.slots[id.0].element
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.slots[id.0].children
    }

    /// Number of elements in the tree, root included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`: the root slot exists from construction and can never
    /// be removed. Kept so `len` has the conventional companion.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Depth-first, document order walk below `id` (excluding `id` itself)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// First descendant of `from` (document order) matching `predicate`
    pub fn find<P>(&self, from: NodeId, predicate: P) -> Option<NodeId>
    where
        P: Fn(&Element) -> bool,
    {
        self.descendants(from)
            .into_iter()
            .find(|id| predicate(self.element(*id)))
    }

    /// Children of `id` whose tag equals `tag`
    pub fn children_tagged(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.element(*child).tag == tag)
            .collect()
    }

    /// Serialize the whole tree, root element included
    pub fn to_html(&self) -> String {
        self.to_html_from(self.root())
    }

    /// Serialize the subtree rooted at `id` as indented HTML
    pub fn to_html_from(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, id, 0);
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let slot = &self.slots[id.0];
        let element = &slot.element;
        let indent = "  ".repeat(depth);

        let _ = write!(out, "{}<{}", indent, element.tag);
        for (key, value) in element.attributes() {
            let _ = write!(out, " {}=\"{}\"", key, escape_attr(value));
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&element.tag.as_str()) {
            out.push('\n');
            return;
        }

        if let Some(text) = &element.text {
            out.push_str(&escape_text(text));
        }

        if slot.children.is_empty() {
            let _ = writeln!(out, "</{}>", element.tag);
            return;
        }

        out.push('\n');
        for child in &slot.children {
            self.write_node(out, *child, depth + 1);
        }
        let _ = writeln!(out, "{}</{}>", indent, element.tag);
    }
}

pub fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

pub fn escape_attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}
