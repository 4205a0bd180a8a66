// NOTE: rsreport Assembly Rationale
//
// Why an arena tree (not Rc<RefCell<Node>>)?
// - Sections are created and filled in arbitrary order by report content code
// - Callers hold NodeId handles to keep appending without borrowing the tree
// - No parent pointers: the "Top" link of a heading is the textual #TOC anchor
//
// Why a flat TOC log rebuilt at render time?
// - Navigation nesting depends only on registration order and levels
// - Untitled structural sections are logged but never shown
// - Rebuilding is pure, so the TOC can be rendered any number of times
//
// Why tagged CellValue (not sniffing strings)?
// - Row sources know the storage type; formatting never has to guess
// - Formatting still never fails: faults degrade to the `unknown` class

mod document;
mod error;
mod format;
mod layer;
mod node;
mod render;
mod source;
mod style;
mod table;
mod toc;

pub use document::{DEFAULT_CSS, Document, Section};
pub use error::{Error, Result};
pub use format::{CellValue, FormattedValue, ValueKind, class, format_identifier, format_value};
pub use layer::{LayerDescriptor, human_size, print_layer};
pub use node::{Element, NodeId, Tree};
pub use render::{
    DATE_FORMAT, DEFAULT_TEMPLATE, JinjaTemplate, RenderPayload, Renderer, ReportMetadata,
    TemplateEngine,
};
pub use source::{Row, RowSource};
pub use style::{CssBeautifier, StyleFormatter};
pub use table::TableBuilder;
pub use toc::{TOC_ID, TocEntry, TocRegistry};
