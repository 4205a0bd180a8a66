//! Table rendering for the three data shapes report content comes in:
//! query results, in-memory rows and key/value pairs.

use crate::format::{CellValue, FormattedValue, format_identifier, format_value};
use crate::node::{Element, NodeId, Tree};
use crate::source::RowSource;
use crate::{Error, Result};

/// Appends one `table` element to `parent` when finished.
///
/// ```
/// use rsreport_core::{CellValue, Element, TableBuilder, Tree};
///
/// let mut tree = Tree::new(Element::new("div"));
/// let root = tree.root();
/// TableBuilder::new(&mut tree, root)
///     .attr("id", "SummTable")
///     .from_pairs([("Reaches", CellValue::Integer(1200))]);
/// assert!(tree.to_html().contains("1,200"));
/// ```
pub struct TableBuilder<'a> {
    tree: &'a mut Tree,
    parent: NodeId,
    attributes: Vec<(String, String)>,
}

impl<'a> TableBuilder<'a> {
    pub fn new(tree: &'a mut Tree, parent: NodeId) -> Self {
        Self {
            tree,
            parent,
            attributes: Vec::new(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn attrs<I, K, V>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attrs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Run `sql` against `source` and render every result row.
    ///
    /// Values of result columns listed in `id_columns` are rendered verbatim
    /// with the `idVal` class; everything else goes through the formatter.
    pub fn from_query(
        self,
        columns: &[&str],
        sql: &str,
        source: &dyn RowSource,
        id_columns: &[&str],
    ) -> Result<()> {
        let rows = source.query(sql)?;

        let mut body = Vec::with_capacity(rows.len());
        for row in rows {
            let cells: Vec<FormattedValue> = row
                .iter()
                .map(|(name, value)| {
                    if id_columns.contains(&name) {
                        format_identifier(value)
                    } else {
                        format_value(value, None)
                    }
                })
                .collect();
            check_width(columns.len(), cells.len())?;
            body.push(cells);
        }

        self.finish(columns, body);
        Ok(())
    }

    /// Render in-memory rows under explicit headers. No identifier bypass.
    pub fn from_rows<I, R, V>(self, columns: &[&str], rows: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut body = Vec::new();
        for row in rows {
            let cells: Vec<FormattedValue> = row
                .into_iter()
                .map(|value| format_value(&value.into(), None))
                .collect();
            check_width(columns.len(), cells.len())?;
            body.push(cells);
        }

        self.finish(columns, body);
        Ok(())
    }

    /// Two column `dictable`: keys as row headers, formatted values beside
    /// them, in iteration order.
    pub fn from_pairs<I, K, V>(mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        let class = match self.attributes.iter().position(|(k, _)| k == "class") {
            Some(idx) => format!("dictable {}", self.attributes.remove(idx).1),
            None => "dictable".to_string(),
        };
        self.attributes.push(("class".to_string(), class));

        let table = self.tree.append(
            self.parent,
            Element::new("table").with_attrs(self.attributes),
        );
        let tbody = self.tree.append(table, Element::new("tbody"));

        for (key, value) in pairs {
            let tr = self.tree.append(tbody, Element::new("tr"));
            self.tree.append(tr, Element::new("th").with_text(key));
            let formatted = format_value(&value.into(), None);
            self.tree.append(tr, cell(formatted));
        }
    }

    fn finish(self, columns: &[&str], body: Vec<Vec<FormattedValue>>) {
        let table = self.tree.append(
            self.parent,
            Element::new("table").with_attrs(self.attributes),
        );

        let thead = self.tree.append(table, Element::new("thead"));
        let header_row = self.tree.append(thead, Element::new("tr"));
        for column in columns {
            self.tree.append(header_row, Element::new("th").with_text(*column));
        }

        let tbody = self.tree.append(table, Element::new("tbody"));
        for cells in body {
            let tr = self.tree.append(tbody, Element::new("tr"));
            for formatted in cells {
                self.tree.append(tr, cell(formatted));
            }
        }
    }
}

fn cell(formatted: FormattedValue) -> Element {
    Element::new("td")
        .with_attr("class", formatted.style_class)
        .with_text(formatted.text)
}

fn check_width(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::ColumnMismatch { expected, found })
    }
}
