//! Sparse attributes for semantic nodes.
//!
//! Most nodes carry no attributes at all, so they live in side-tables keyed
//! by NodeId instead of as fields on every Node. Setters skip the default
//! value, which is what keeps the "omitted if zero" shape of the table
//! attributes: a table with no heading rows simply has no entry.

use std::collections::HashMap;

use super::node::NodeId;

/// Sparse map for semantic attributes.
#[derive(Debug, Default, Clone)]
pub struct AttrMap {
    /// Number of heading rows at the start of a table (table nodes).
    heading_rows: HashMap<NodeId, u32>,
    /// Number of leading heading columns (table nodes).
    heading_columns: HashMap<NodeId, u32>,
    /// Number of footer rows at the end of a table (table nodes).
    footer_rows: HashMap<NodeId, u32>,
    /// rowspan carried through from the source cell (cell nodes).
    row_span: HashMap<NodeId, u32>,
    /// colspan carried through from the source cell (cell nodes).
    col_span: HashMap<NodeId, u32>,
}

impl AttrMap {
    /// Create a new empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    // --- heading_rows ---

    /// Set the heading row count for a table. Zero is the default and is
    /// not stored.
    pub fn set_heading_rows(&mut self, node: NodeId, count: u32) {
        if count > 0 {
            self.heading_rows.insert(node, count);
        }
    }

    /// Get the heading row count for a table.
    /// Returns None if not set (defaults to 0).
    pub fn heading_rows(&self, node: NodeId) -> Option<u32> {
        self.heading_rows.get(&node).copied()
    }

    // --- heading_columns ---

    /// Set the heading column count for a table. Zero is the default and is
    /// not stored.
    pub fn set_heading_columns(&mut self, node: NodeId, count: u32) {
        if count > 0 {
            self.heading_columns.insert(node, count);
        }
    }

    /// Get the heading column count for a table.
    /// Returns None if not set (defaults to 0).
    pub fn heading_columns(&self, node: NodeId) -> Option<u32> {
        self.heading_columns.get(&node).copied()
    }

    // --- footer_rows ---

    /// Set the footer row count for a table. Zero is the default and is
    /// not stored.
    pub fn set_footer_rows(&mut self, node: NodeId, count: u32) {
        if count > 0 {
            self.footer_rows.insert(node, count);
        }
    }

    /// Get the footer row count for a table.
    /// Returns None if not set (defaults to 0).
    pub fn footer_rows(&self, node: NodeId) -> Option<u32> {
        self.footer_rows.get(&node).copied()
    }

    // --- row_span ---

    /// Set the rowspan for a table cell.
    pub fn set_row_span(&mut self, node: NodeId, span: u32) {
        if span > 1 {
            self.row_span.insert(node, span);
        }
    }

    /// Get the rowspan for a table cell.
    /// Returns None if not set (defaults to 1).
    pub fn row_span(&self, node: NodeId) -> Option<u32> {
        self.row_span.get(&node).copied()
    }

    // --- col_span ---

    /// Set the colspan for a table cell.
    pub fn set_col_span(&mut self, node: NodeId, span: u32) {
        if span > 1 {
            self.col_span.insert(node, span);
        }
    }

    /// Get the colspan for a table cell.
    /// Returns None if not set (defaults to 1).
    pub fn col_span(&self, node: NodeId) -> Option<u32> {
        self.col_span.get(&node).copied()
    }

    // --- Generic access ---

    /// Get a count attribute by name.
    ///
    /// Uniform access for consumers that query attributes dynamically.
    /// Recognized names: `"headingRows"`, `"headingColumns"`, `"footerRows"`,
    /// `"rowspan"`, `"colspan"`.
    pub fn get_count(&self, node: NodeId, name: &str) -> Option<u32> {
        match name {
            "headingRows" => self.heading_rows(node),
            "headingColumns" => self.heading_columns(node),
            "footerRows" => self.footer_rows(node),
            "rowspan" => self.row_span(node),
            "colspan" => self.col_span(node),
            _ => None,
        }
    }

    /// Set a count attribute by name.
    ///
    /// Returns `true` if the attribute name was recognized, `false` otherwise.
    pub fn set_count(&mut self, node: NodeId, name: &str, value: u32) -> bool {
        match name {
            "headingRows" => {
                self.set_heading_rows(node, value);
                true
            }
            "headingColumns" => {
                self.set_heading_columns(node, value);
                true
            }
            "footerRows" => {
                self.set_footer_rows(node, value);
                true
            }
            "rowspan" => {
                self.set_row_span(node, value);
                true
            }
            "colspan" => {
                self.set_col_span(node, value);
                true
            }
            _ => false,
        }
    }

    /// Get the total number of stored attributes.
    pub fn len(&self) -> usize {
        self.heading_rows.len()
            + self.heading_columns.len()
            + self.footer_rows.len()
            + self.row_span.len()
            + self.col_span.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_counts_are_omitted() {
        let mut attrs = AttrMap::new();
        let table = NodeId(1);

        attrs.set_heading_rows(table, 0);
        attrs.set_footer_rows(table, 0);
        attrs.set_heading_columns(table, 2);

        assert_eq!(attrs.heading_rows(table), None);
        assert_eq!(attrs.footer_rows(table), None);
        assert_eq!(attrs.heading_columns(table), Some(2));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_default_spans_are_omitted() {
        let mut attrs = AttrMap::new();
        let cell = NodeId(4);

        attrs.set_col_span(cell, 1);
        assert_eq!(attrs.col_span(cell), None);

        attrs.set_col_span(cell, 3);
        assert_eq!(attrs.col_span(cell), Some(3));
    }

    #[test]
    fn test_name_keyed_access() {
        let mut attrs = AttrMap::new();
        let table = NodeId(1);

        assert!(attrs.set_count(table, "headingRows", 2));
        assert!(!attrs.set_count(table, "border", 1));
        assert_eq!(attrs.get_count(table, "headingRows"), Some(2));
        assert_eq!(attrs.get_count(table, "footerRows"), None);
    }
}
