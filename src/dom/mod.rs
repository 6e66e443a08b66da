//! Source DOM: the read-only input side of a conversion pass.
//!
//! Table fragments arrive as HTML text and are parsed with html5ever into an
//! arena-allocated tree ([`SourceDom`]). The conversion core only ever reads
//! this tree; all output goes into a separately owned
//! [`SemanticTree`](crate::model::SemanticTree).

mod arena;
mod tree_sink;

pub use arena::{Attribute, ChildrenIter, SourceData, SourceDom, SourceId, SourceNode};
pub use tree_sink::{NodeHandle, SourceSink};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse a fragment of HTML (not a full document) into a [`SourceDom`].
///
/// The fragment is wrapped in a minimal document so the tree builder runs in
/// a body context; table structure repairs (implied `<tbody>`, foster
/// parenting) apply the same way a browser would apply them.
pub fn parse_fragment(html: &str) -> SourceDom {
    let wrapped = format!(
        "<!DOCTYPE html><html><head></head><body>{}</body></html>",
        html
    );
    let sink = SourceSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(wrapped.as_bytes())
        .into_dom()
}
