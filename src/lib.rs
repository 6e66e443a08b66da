//! # tablecast
//!
//! Structural import of messy HTML tables into a canonical semantic tree.
//!
//! Real-world table markup arrives malformed: sections out of order,
//! duplicate `<thead>`s, blank leading rows, cells with nothing but anchor
//! markers in them. tablecast converts any such fragment into a single
//! normalized table node whose rows follow rendered order (heading, body,
//! footer) and whose heading geometry is inferred from the cells
//! themselves.
//!
//! ## Quick Start
//!
//! ```
//! use tablecast::{NodeId, import_table};
//!
//! let tree = import_table(
//!     "<table>\
//!      <tbody><tr><td>2</td></tr></tbody>\
//!      <thead><tr><td>1</td></tr></thead>\
//!      <tbody><tr><td>3</td></tr></tbody>\
//!      </table>",
//! )
//! .unwrap();
//!
//! let table = tree.children(NodeId::ROOT).next().unwrap();
//! assert_eq!(tree.attrs.heading_rows(table), Some(1));
//!
//! let rows: Vec<String> = tree.children(table).map(|r| tree.deep_text(r)).collect();
//! assert_eq!(rows, ["1", "2", "3"]);
//! ```
//!
//! ## Extending the converter
//!
//! The default handlers cover the table subtree; surrounding pipelines
//! register their own handlers on the same [`Converter`] (keyed by element
//! name or the any-element wildcard, with a priority) and drive a pass
//! through [`Pass`] and [`Converter::convert`] directly. Handlers claim
//! node aspects through the pass's [`Consumables`] so independent
//! converters never double-process a node.

pub mod convert;
pub mod dom;
mod error;
pub mod model;

pub use convert::{
    Aspect, Consumables, Conversion, Converter, Flow, Pass, Position, Priority, TableScan,
    scan_table,
};
pub use dom::{SourceDom, SourceId, parse_fragment};
pub use error::{Error, Result};
pub use model::{AttrMap, Node, NodeId, Role, SemanticTree, TextRange};

/// Import the first table found in an HTML fragment.
///
/// Parses the fragment, locates the first `<table>` or
/// `<figure class="table">` wrapper, and runs a conversion pass with the
/// default handler set. The produced table is the sole child of the
/// returned tree's root.
///
/// Returns [`Error::NoTable`] when the fragment holds nothing convertible
/// to a table.
pub fn import_table(html: &str) -> Result<SemanticTree> {
    let dom = parse_fragment(html);
    let Some(target) = dom.find(|dom, id| {
        dom.is_named(id, "table") || (dom.is_named(id, "figure") && dom.has_class(id, "table"))
    }) else {
        return Err(Error::NoTable);
    };

    let converter = Converter::with_table_defaults();
    let mut tree = SemanticTree::new();
    let mut pass = Pass::new(&dom, &mut tree);
    let converted = converter.convert(&mut pass, target, Position::new(NodeId::ROOT, 0));
    if converted.is_unconverted() {
        return Err(Error::NoTable);
    }
    Ok(tree)
}
