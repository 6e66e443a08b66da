//! End-to-end table import tests.
//!
//! These drive the public API with real HTML strings: parse, convert with
//! the default handler set, and assert on the produced semantic tree.

use proptest::prelude::*;
use tablecast::{
    Aspect, Converter, Flow, NodeId, Pass, Position, Role, SemanticTree, import_table,
    parse_fragment,
};

fn import(html: &str) -> SemanticTree {
    import_table(html).expect("input should convert to a table")
}

fn table_of(tree: &SemanticTree) -> NodeId {
    tree.children(NodeId::ROOT)
        .next()
        .expect("root should hold the produced table")
}

fn rows_of(tree: &SemanticTree, table: NodeId) -> Vec<NodeId> {
    tree.children(table)
        .filter(|&c| tree.role(c) == Some(Role::TableRow))
        .collect()
}

fn row_texts(tree: &SemanticTree, table: NodeId) -> Vec<String> {
    rows_of(tree, table)
        .iter()
        .map(|&row| tree.deep_text(row))
        .collect()
}

// ============================================================================
// Row-order canonicalization
// ============================================================================

#[test]
fn test_end_to_end_reorder() {
    let tree = import(
        "<table>\
         <tbody><tr><td>2</td></tr></tbody>\
         <thead><tr><td>1</td></tr></thead>\
         <tbody><tr><td>3</td></tr></tbody>\
         </table>",
    );
    let table = table_of(&tree);

    assert_eq!(tree.attrs.heading_rows(table), Some(1));
    assert_eq!(tree.attrs.footer_rows(table), None);
    assert_eq!(row_texts(&tree, table), vec!["1", "2", "3"]);
}

#[test]
fn test_foot_body_head_source_order() {
    let tree = import(
        "<table>\
         <tfoot><tr><td>f1</td></tr></tfoot>\
         <tbody><tr><td>b1</td></tr><tr><td>b2</td></tr></tbody>\
         <thead><tr><td>h1</td></tr></thead>\
         </table>",
    );
    let table = table_of(&tree);

    assert_eq!(row_texts(&tree, table), vec!["h1", "b1", "b2", "f1"]);
    assert_eq!(tree.attrs.heading_rows(table), Some(1));
    assert_eq!(tree.attrs.footer_rows(table), Some(1));
}

#[test]
fn test_conversion_is_deterministic() {
    let html = "<table>\
         <tfoot><tr><td>f</td></tr></tfoot>\
         <thead><tr><td>h</td></tr></thead>\
         <tbody><tr><th>k</th><td>v</td></tr></tbody>\
         </table>";

    let shape = |tree: &SemanticTree| {
        fn walk(tree: &SemanticTree, id: NodeId, depth: usize, out: &mut Vec<(usize, Role, String)>) {
            let role = tree.role(id).unwrap();
            let text = if role == Role::Text {
                tree.text_of(id).to_string()
            } else {
                String::new()
            };
            out.push((depth, role, text));
            for child in tree.children(id) {
                walk(tree, child, depth + 1, out);
            }
        }
        let mut out = Vec::new();
        walk(tree, NodeId::ROOT, 0, &mut out);
        out
    };

    assert_eq!(shape(&import(html)), shape(&import(html)));
}

// ============================================================================
// Heading inference
// ============================================================================

#[test]
fn test_implicit_heading_row_counted() {
    let tree = import(
        "<table><tbody>\
         <tr><td>data</td></tr>\
         <tr><th>a</th><th>b</th></tr>\
         </tbody></table>",
    );
    let table = table_of(&tree);

    assert_eq!(tree.attrs.heading_rows(table), Some(1));
    assert_eq!(row_texts(&tree, table), vec!["ab", "data"]);
}

#[test]
fn test_heading_columns_is_minimum_run() {
    // Leading th runs of 3, 1, 2 -> headingColumns = 1
    let tree = import(
        "<table><tbody>\
         <tr><th>a</th><th>b</th><th>c</th><td>d</td></tr>\
         <tr><th>a</th><td>b</td><td>c</td><td>d</td></tr>\
         <tr><th>a</th><th>b</th><td>c</td><td>d</td></tr>\
         </tbody></table>",
    );
    let table = table_of(&tree);

    assert_eq!(tree.attrs.heading_columns(table), Some(1));
}

#[test]
fn test_zero_counts_are_absent() {
    let tree = import("<table><tbody><tr><td>x</td></tr></tbody></table>");
    let table = table_of(&tree);

    assert_eq!(tree.attrs.heading_rows(table), None);
    assert_eq!(tree.attrs.heading_columns(table), None);
    assert_eq!(tree.attrs.footer_rows(table), None);
}

// ============================================================================
// Degenerate-input repairs
// ============================================================================

#[test]
fn test_empty_table_gets_one_row_one_cell() {
    let tree = import("<table></table>");
    let table = table_of(&tree);

    let rows = rows_of(&tree, table);
    assert_eq!(rows.len(), 1);

    let cells: Vec<_> = tree.children(rows[0]).collect();
    assert_eq!(cells.len(), 1);
    assert_eq!(tree.role(cells[0]), Some(Role::TableCell));
}

#[test]
fn test_empty_cell_gets_paragraph() {
    let tree = import("<table><tbody><tr><td></td></tr></tbody></table>");
    let table = table_of(&tree);

    let row = rows_of(&tree, table)[0];
    let cell = tree.children(row).next().unwrap();
    let children: Vec<_> = tree.children(cell).collect();

    assert_eq!(children.len(), 1);
    assert_eq!(tree.role(children[0]), Some(Role::Paragraph));
    assert_eq!(tree.child_count(children[0]), 0);
}

#[test]
fn test_marker_only_cell_gets_paragraph_host() {
    let tree = import(
        "<table><tbody><tr>\
         <td><a id=\"m1\"></a><a name=\"m2\"></a></td>\
         </tr></tbody></table>",
    );
    let table = table_of(&tree);

    let row = rows_of(&tree, table)[0];
    let cell = tree.children(row).next().unwrap();
    let children: Vec<_> = tree.children(cell).collect();

    // The cell's sole child is a paragraph hosting both markers
    assert_eq!(children.len(), 1);
    assert_eq!(tree.role(children[0]), Some(Role::Paragraph));

    let markers: Vec<_> = tree.children(children[0]).collect();
    assert_eq!(markers.len(), 2);
    assert!(markers.iter().all(|&m| tree.role(m) == Some(Role::Marker)));
    // Relative order preserved: the first marker was allocated first
    assert!(markers[0].0 < markers[1].0);
}

#[test]
fn test_cell_with_text_and_marker_is_left_alone() {
    let tree = import(
        "<table><tbody><tr>\
         <td><a id=\"m\"></a>text</td>\
         </tr></tbody></table>",
    );
    let table = table_of(&tree);

    let row = rows_of(&tree, table)[0];
    let cell = tree.children(row).next().unwrap();
    let roles: Vec<_> = tree.children(cell).filter_map(|c| tree.role(c)).collect();

    assert_eq!(roles, vec![Role::Marker, Role::Text]);
}

#[test]
fn test_leading_blank_row_suppressed() {
    let tree = import(
        "<table><tbody>\
         <tr></tr>\
         <tr><td>x</td></tr>\
         </tbody></table>",
    );
    let table = table_of(&tree);

    assert_eq!(row_texts(&tree, table), vec!["x"]);
}

#[test]
fn test_whitespace_only_leading_row_suppressed() {
    let tree = import("<table><tbody><tr>   </tr><tr><td>x</td></tr></tbody></table>");
    let table = table_of(&tree);

    assert_eq!(rows_of(&tree, table).len(), 1);
}

#[test]
fn test_later_blank_row_survives() {
    let tree = import(
        "<table><tbody>\
         <tr><td>x</td></tr>\
         <tr></tr>\
         </tbody></table>",
    );
    let table = table_of(&tree);

    let rows = rows_of(&tree, table);
    assert_eq!(rows.len(), 2);
    assert_eq!(tree.child_count(rows[1]), 0);
}

// ============================================================================
// Figure unwrap
// ============================================================================

#[test]
fn test_figure_unwraps_to_inner_table() {
    let tree = import(
        "<figure class=\"table\">\
         <table><tbody><tr><td>x</td></tr></tbody></table>\
         <figcaption>A caption</figcaption>\
         </figure>",
    );
    let table = table_of(&tree);

    assert_eq!(tree.role(table), Some(Role::Table));
    assert_eq!(row_texts(&tree, table), vec!["x"]);

    // The figcaption is reattached at the end of the table
    let last = tree.children(table).last().unwrap();
    assert_eq!(tree.role(last), Some(Role::Caption));
    assert_eq!(tree.deep_text(last), "A caption");
}

#[test]
fn test_figure_without_table_class_is_ignored() {
    // A plain figure is not a table wrapper; the inner table still converts
    // because the search descends to it.
    let tree = import("<figure><table><tbody><tr><td>x</td></tr></tbody></table></figure>");
    let table = table_of(&tree);
    assert_eq!(row_texts(&tree, table), vec!["x"]);
}

#[test]
fn test_figure_unwrap_reverts_claim_when_inner_conversion_fails() {
    let dom = parse_fragment(
        "<figure class=\"table\"><table><tbody><tr><td>x</td></tr></tbody></table></figure>",
    );
    let figure = dom.find_by_tag("figure").unwrap();

    let converter = Converter::with_table_defaults();
    let mut tree = SemanticTree::new();
    let para = {
        let mut pass = Pass::new(&dom, &mut tree);
        pass.safe_insert(Position::new(NodeId::ROOT, 0), Role::Paragraph)
            .unwrap()
    };

    // A table may not be placed inside a paragraph, so the inner conversion
    // is rejected and the figure's claim must be rolled back.
    let mut pass = Pass::new(&dom, &mut tree);
    let converted = converter.convert(&mut pass, figure, Position::new(para, 0));

    assert!(converted.is_unconverted());
    assert!(pass.consumed.test(figure, &[Aspect::Name, Aspect::class("table")]));
    assert_eq!(pass.output.child_count(para), 0);
}

// ============================================================================
// Captions, spans, and content
// ============================================================================

#[test]
fn test_caption_converted_after_rows() {
    let tree = import(
        "<table>\
         <caption>Totals</caption>\
         <tbody><tr><td>x</td></tr></tbody>\
         </table>",
    );
    let table = table_of(&tree);

    let roles: Vec<_> = tree.children(table).filter_map(|c| tree.role(c)).collect();
    assert_eq!(roles, vec![Role::TableRow, Role::Caption]);
}

#[test]
fn test_spans_carried_onto_cells() {
    let tree = import(
        "<table><tbody><tr>\
         <td colspan=\"3\" rowspan=\"2\">wide</td>\
         <td>plain</td>\
         </tr></tbody></table>",
    );
    let table = table_of(&tree);

    let row = rows_of(&tree, table)[0];
    let cells: Vec<_> = tree.children(row).collect();
    assert_eq!(tree.attrs.col_span(cells[0]), Some(3));
    assert_eq!(tree.attrs.row_span(cells[0]), Some(2));
    assert_eq!(tree.attrs.col_span(cells[1]), None);
}

#[test]
fn test_cell_content_survives() {
    let tree = import(
        "<table><tbody><tr>\
         <td><p>first</p><p>second</p></td>\
         </tr></tbody></table>",
    );
    let table = table_of(&tree);

    let row = rows_of(&tree, table)[0];
    let cell = tree.children(row).next().unwrap();
    let paras: Vec<_> = tree.children(cell).collect();

    assert_eq!(paras.len(), 2);
    assert!(paras.iter().all(|&p| tree.role(p) == Some(Role::Paragraph)));
    assert_eq!(tree.deep_text(cell), "firstsecond");
}

#[test]
fn test_no_table_input_is_an_error() {
    assert!(import_table("<p>nothing here</p>").is_err());
    assert!(import_table("").is_err());
}

// ============================================================================
// Cooperative dispatch
// ============================================================================

#[test]
fn test_consumed_identity_blocks_later_handlers() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let observed = Rc::new(RefCell::new(Vec::new()));
    let mut converter = Converter::with_table_defaults();
    {
        let observed = observed.clone();
        converter.on_element("table", tablecast::Priority::Low, move |_, pass, node, _| {
            observed
                .borrow_mut()
                .push(pass.consumed.test(node, &[Aspect::Name]));
            Flow::Pass
        });
    }

    let dom = parse_fragment("<table><tbody><tr><td>x</td></tr></tbody></table>");
    let table = dom.find_by_tag("table").unwrap();
    let mut tree = SemanticTree::new();
    let mut pass = Pass::new(&dom, &mut tree);
    converter.convert(&mut pass, table, Position::new(NodeId::ROOT, 0));

    // The default table handler claimed the identity before our low-priority
    // observer ran.
    assert_eq!(*observed.borrow(), vec![false]);
}

// ============================================================================
// Canonical order property
// ============================================================================

proptest! {
    /// For any interleaving of sections, the emitted rows are always
    /// heading rows, then body rows, then footer rows, each group
    /// preserving source order within itself.
    #[test]
    fn prop_canonical_row_order(sections in prop::collection::vec((0u8..3, 1usize..4), 0..6)) {
        let mut html = String::from("<table>");
        let mut labelled = Vec::new();
        let mut label = 0;
        for &(kind, count) in &sections {
            let tag = match kind {
                0 => "thead",
                1 => "tbody",
                _ => "tfoot",
            };
            html.push_str(&format!("<{tag}>"));
            let mut rows = Vec::new();
            for _ in 0..count {
                html.push_str(&format!("<tr><td>r{label}</td></tr>"));
                rows.push(format!("r{label}"));
                label += 1;
            }
            html.push_str(&format!("</{tag}>"));
            labelled.push((kind, rows));
        }
        html.push_str("</table>");

        let first_head = labelled.iter().position(|(k, _)| *k == 0);
        let first_foot = labelled.iter().position(|(k, _)| *k == 2);

        let mut expected = Vec::new();
        if let Some(i) = first_head {
            expected.extend(labelled[i].1.iter().cloned());
        }
        for (i, (_, rows)) in labelled.iter().enumerate() {
            if Some(i) == first_head || Some(i) == first_foot {
                continue;
            }
            expected.extend(rows.iter().cloned());
        }
        if let Some(i) = first_foot {
            expected.extend(labelled[i].1.iter().cloned());
        }

        let tree = import(&html);
        let table = table_of(&tree);

        if expected.is_empty() {
            // Degenerate table: repaired to one row with one empty cell
            let rows = rows_of(&tree, table);
            prop_assert_eq!(rows.len(), 1);
            prop_assert_eq!(tree.child_count(rows[0]), 1);
        } else {
            prop_assert_eq!(row_texts(&tree, table), expected);

            let head_count = first_head.map(|i| labelled[i].1.len() as u32).unwrap_or(0);
            let foot_count = first_foot.map(|i| labelled[i].1.len() as u32).unwrap_or(0);
            prop_assert_eq!(
                tree.attrs.heading_rows(table),
                (head_count > 0).then_some(head_count)
            );
            prop_assert_eq!(
                tree.attrs.footer_rows(table),
                (foot_count > 0).then_some(foot_count)
            );
        }
    }
}
