//! Table structure scanner.
//!
//! Pure classification of a source table's rows into heading, body, and
//! footer groups, plus inference of the leading heading-column count. The
//! scanner reads the source tree and nothing else; conversion state never
//! leaks into it.
//!
//! Browsers render `<thead>`/`<tfoot>` by kind regardless of where they sit
//! in the markup. The scanner reproduces that *rendered* order rather than
//! document order, so a table edited after import matches what the user
//! actually saw:
//!
//! Before (document order):
//! ```text
//! table
//!   tbody  > tr "2"
//!   thead  > tr "1"
//!   tbody  > tr "3"
//! ```
//!
//! After (canonical order):
//! ```text
//! rows: "1", "2", "3"   headingRows: 1
//! ```

use crate::dom::{SourceDom, SourceId};

/// Scanner output: inferred table attributes and the canonical row order.
#[derive(Debug, Clone)]
pub struct TableScan {
    /// Count of heading rows (first head section + implicit all-`<th>` body
    /// rows).
    pub heading_rows: u32,
    /// Minimum leading `<th>` run across body rows, colspan aware. Zero when
    /// there are no body rows or some body row starts with a data cell.
    pub heading_columns: u32,
    /// Count of footer rows (first foot section).
    pub footer_rows: u32,
    /// All rows in canonical order: heading, body, footer, each group
    /// preserving source order within itself.
    pub rows: Vec<SourceId>,
}

/// Scan a table element and classify every row in its sections.
///
/// Only the first `<thead>` and the first `<tfoot>` are significant. Rows of
/// any further head/foot section fall through to the body bucket regardless
/// of their cell kinds; the implicit heading-row promotion applies to rows
/// of actual `<tbody>` sections only. Non-section children (captions, stray
/// text, rows left directly under the table) are not scanned; the builder
/// converts them separately.
pub fn scan_table(dom: &SourceDom, table: SourceId) -> TableScan {
    let mut first_thead = None;
    let mut first_tfoot = None;
    for child in dom.children(table) {
        if first_thead.is_none() && dom.is_named(child, "thead") {
            first_thead = Some(child);
        } else if first_tfoot.is_none() && dom.is_named(child, "tfoot") {
            first_tfoot = Some(child);
        }
    }

    let mut head_rows = Vec::new();
    let mut body_rows = Vec::new();
    let mut foot_rows = Vec::new();
    let mut heading_columns: Option<u32> = None;

    for section in dom.children(table) {
        let is_section = dom.is_named(section, "thead")
            || dom.is_named(section, "tbody")
            || dom.is_named(section, "tfoot");
        if !is_section {
            continue;
        }

        let in_first_head = first_thead == Some(section);
        let in_first_foot = first_tfoot == Some(section);
        let in_body = dom.is_named(section, "tbody");

        for row in dom.children(section) {
            if !dom.is_named(row, "tr") {
                continue;
            }
            if in_first_head {
                head_rows.push(row);
            } else if in_body && is_heading_row(dom, row) {
                head_rows.push(row);
            } else if in_first_foot {
                foot_rows.push(row);
            } else {
                let run = leading_heading_run(dom, row);
                heading_columns = Some(heading_columns.map_or(run, |min| min.min(run)));
                body_rows.push(row);
            }
        }
    }

    let heading_rows = head_rows.len() as u32;
    let footer_rows = foot_rows.len() as u32;

    let mut rows = head_rows;
    rows.append(&mut body_rows);
    rows.append(&mut foot_rows);

    TableScan {
        heading_rows,
        heading_columns: heading_columns.unwrap_or(0),
        footer_rows,
        rows,
    }
}

/// Check if a body row is implicitly a heading row: it has at least one
/// cell and every cell is a `<th>`.
fn is_heading_row(dom: &SourceDom, row: SourceId) -> bool {
    let mut has_cells = false;
    for cell in dom.children(row) {
        if dom.is_named(cell, "th") {
            has_cells = true;
        } else if dom.is_named(cell, "td") {
            return false;
        }
    }
    has_cells
}

/// Sum the column span of the contiguous run of `<th>` cells at the start
/// of a row, stopping at the first data cell.
fn leading_heading_run(dom: &SourceDom, row: SourceId) -> u32 {
    let mut run = 0;
    for cell in dom.children(row) {
        if dom.is_named(cell, "th") {
            run += col_span(dom, cell);
        } else if dom.is_named(cell, "td") {
            break;
        }
    }
    run
}

/// Parse a cell's colspan attribute; malformed or missing values count as 1.
fn col_span(dom: &SourceDom, cell: SourceId) -> u32 {
    dom.get_attr(cell, "colspan")
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}
