//! Degenerate-input repairs around row and cell conversion.

use crate::dom::SourceId;
use crate::model::{NodeId, Role};

use super::dispatch::{Conversion, Converter, Flow, Pass, Position};

/// Suppress conversion of a content-less row when it would be the very
/// first row inserted.
///
/// Registered at high priority on `<tr>`. A stray blank row at the top of a
/// malformed table would otherwise corrupt the heading-row count; blank
/// rows further down are left to normal (possibly also-empty) conversion.
pub fn skip_leading_blank_row(
    _conv: &Converter,
    pass: &mut Pass<'_>,
    row: SourceId,
    out: &mut Conversion,
) -> Flow {
    if pass.source.is_empty(row) && out.cursor.offset == 0 {
        return Flow::Stop;
    }
    Flow::Pass
}

/// Guarantee that every converted cell holds at least one block.
///
/// Registered at low priority on `<td>`/`<th>`, after the cell converter
/// has already produced the semantic cell and converted its children:
/// - an empty source cell gets one empty paragraph;
/// - a cell whose converted children are all non-rendering markers gets a
///   paragraph host, with the markers moved inside it in their original
///   order. A cell must never contain bare markers with no paragraph host.
pub fn repair_cell_content(
    _conv: &Converter,
    pass: &mut Pass<'_>,
    cell: SourceId,
    out: &mut Conversion,
) -> Flow {
    let Some(model_cell) = out.first() else {
        return Flow::Pass;
    };

    if pass.source.is_empty(cell) {
        let _ = pass.safe_insert(Position::new(model_cell, 0), Role::Paragraph);
        return Flow::Stop;
    }

    let children: Vec<NodeId> = pass.output.children(model_cell).collect();
    let all_markers = !children.is_empty()
        && children
            .iter()
            .all(|&c| pass.output.role(c) == Some(Role::Marker));
    if all_markers {
        if let Some(host) = pass.safe_insert(Position::new(model_cell, 0), Role::Paragraph) {
            for marker in children {
                pass.output.remove_from_parent(marker);
                pass.output.append_child(host, marker);
            }
        }
    }
    Flow::Continue
}
