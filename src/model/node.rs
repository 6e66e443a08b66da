//! Semantic node types and roles.

/// Unique identifier for a node within a SemanticTree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node ID (always 0).
    pub const ROOT: NodeId = NodeId(0);
}

/// Semantic role of a node (independent of source element).
///
/// Roles describe structure only. Table semantics (which rows head the
/// table, how many leading columns are headers) live as attributes on the
/// table node in [`AttrMap`](super::AttrMap), not as per-cell roles; the
/// source distinction between `<th>` and `<td>` is consumed by the scanner
/// and does not survive into the output tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Leaf text content node containing actual string data.
    /// References a range in the tree's text buffer.
    #[default]
    Text,
    /// Root document node.
    Root,
    /// Generic structural container.
    Container,
    /// Paragraph - a block-level text container.
    Paragraph,
    /// Table structure. Carries headingRows / headingColumns / footerRows
    /// attributes when non-zero.
    Table,
    /// Table rows.
    TableRow,
    /// Table cells. Carries colspan / rowspan attributes when > 1.
    TableCell,
    /// Caption for a table.
    Caption,
    /// Generic inline container.
    Inline,
    /// Non-rendering marker (bookmark anchors, comment boundaries).
    /// A leaf that must always sit inside a paragraph host in cells.
    Marker,
    /// Semantic line break. A leaf node, not a container.
    Break,
}

/// Range into the tree's text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    /// Byte offset into SemanticTree.text.
    pub start: u32,
    /// Length in bytes.
    pub len: u32,
}

impl TextRange {
    /// Create a new text range.
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// Check if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the end offset.
    pub fn end(&self) -> u32 {
        self.start + self.len
    }
}

/// A node in the semantic tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Semantic role.
    pub role: Role,
    /// Parent node (None for root).
    pub parent: Option<NodeId>,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Next sibling node.
    pub next_sibling: Option<NodeId>,
    /// Text content range (only for Text nodes).
    pub text: TextRange,
}

impl Node {
    /// Create a new node with default values.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            parent: None,
            first_child: None,
            next_sibling: None,
            text: TextRange::default(),
        }
    }

    /// Create a text node with the given range.
    pub fn text(range: TextRange) -> Self {
        Self {
            role: Role::Text,
            parent: None,
            first_child: None,
            next_sibling: None,
            text: range,
        }
    }
}
