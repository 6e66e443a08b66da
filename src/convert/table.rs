//! Table, row, and cell upcast handlers.

use crate::dom::SourceId;
use crate::model::{Node, NodeId, Role};

use super::consumable::Aspect;
use super::dispatch::{Conversion, Converter, Flow, Pass, Position};
use super::scan::scan_table;

const IDENTITY: &[Aspect] = &[Aspect::Name];

/// Upcast a `<table>` element into a semantic table with canonical row
/// order and inferred heading attributes.
///
/// Claims the table's identity only after the semantic table is safely
/// placed; a schema rejection leaves the node untouched for other handlers.
/// Rows are converted in the scanner's canonical order, which reorders the
/// output relative to a malformed source. Whatever non-section content
/// remains (captions, stray rows) is converted at the end of the table, and
/// a table that still has no children gets exactly one row with one empty
/// cell so the output is never a childless table.
pub fn upcast_table(
    conv: &Converter,
    pass: &mut Pass<'_>,
    table: SourceId,
    out: &mut Conversion,
) -> Flow {
    if !pass.consumed.test(table, IDENTITY) {
        return Flow::Pass;
    }

    let scan = scan_table(pass.source, table);

    let Some(model_table) = pass.safe_insert(out.cursor, Role::Table) else {
        return Flow::Pass;
    };
    pass.output.attrs.set_heading_rows(model_table, scan.heading_rows);
    pass.output.attrs.set_heading_columns(model_table, scan.heading_columns);
    pass.output.attrs.set_footer_rows(model_table, scan.footer_rows);

    pass.consumed.consume(table, IDENTITY);

    for &row in &scan.rows {
        let pos = Position::end(pass.output, model_table);
        conv.convert(pass, row, pos);
    }

    // Whatever the scanner didn't claim: captions, stray text, rows left
    // directly under the table.
    let source = pass.source;
    for child in source.children(table) {
        if source.is_element(child) && !pass.consumed.test(child, IDENTITY) {
            continue;
        }
        let pos = Position::end(pass.output, model_table);
        conv.convert(pass, child, pos);
    }

    if pass.output.child_count(model_table) == 0 {
        let row = pass.output.alloc_node(Node::new(Role::TableRow));
        pass.output.append_child(model_table, row);
        let cell = pass.output.alloc_node(Node::new(Role::TableCell));
        pass.output.append_child(row, cell);
    }

    out.produced.push(model_table);
    out.cursor = out.cursor.advanced(1);
    Flow::Continue
}

/// Upcast a `<tr>` element into a semantic row and convert its cells.
pub fn upcast_row(
    conv: &Converter,
    pass: &mut Pass<'_>,
    row: SourceId,
    out: &mut Conversion,
) -> Flow {
    if !pass.consumed.test(row, IDENTITY) {
        return Flow::Pass;
    }
    let Some(model_row) = pass.safe_insert(out.cursor, Role::TableRow) else {
        return Flow::Pass;
    };
    pass.consumed.consume(row, IDENTITY);

    conv.convert_children(pass, row, Position::new(model_row, 0));

    out.produced.push(model_row);
    out.cursor = out.cursor.advanced(1);
    Flow::Continue
}

/// Upcast a `<td>`/`<th>` element into a semantic cell.
///
/// Span attributes are claimed and carried onto the cell for downstream
/// span reconciliation. The handler does not stop the chain; the
/// low-priority content repair still inspects the converted cell.
pub fn upcast_cell(
    conv: &Converter,
    pass: &mut Pass<'_>,
    cell: SourceId,
    out: &mut Conversion,
) -> Flow {
    if !pass.consumed.test(cell, IDENTITY) {
        return Flow::Pass;
    }
    let Some(model_cell) = pass.safe_insert(out.cursor, Role::TableCell) else {
        return Flow::Pass;
    };
    pass.consumed.consume(cell, IDENTITY);

    carry_span(pass, cell, model_cell, "colspan");
    carry_span(pass, cell, model_cell, "rowspan");

    conv.convert_children(pass, cell, Position::new(model_cell, 0));

    out.produced.push(model_cell);
    out.cursor = out.cursor.advanced(1);
    Flow::Continue
}

fn carry_span(pass: &mut Pass<'_>, cell: SourceId, model_cell: NodeId, name: &str) {
    let Some(value) = pass.source.get_attr(cell, name) else {
        return;
    };
    let Ok(span) = value.trim().parse::<u32>() else {
        return;
    };
    let aspect = [Aspect::attribute(name)];
    if !pass.consumed.test(cell, &aspect) {
        return;
    }
    pass.consumed.consume(cell, &aspect);
    pass.output.attrs.set_count(model_cell, name, span);
}
