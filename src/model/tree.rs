//! The semantic tree: arena of nodes plus a shared text buffer.

use super::attrs::AttrMap;
use super::node::{Node, NodeId, Role, TextRange};

/// Arena-allocated semantic tree.
///
/// Nodes live in a contiguous vector; node 0 is always the root. Text
/// content is stored in a single shared buffer referenced by TextRange,
/// so text nodes stay Copy-sized. Nodes are allocated detached and become
/// owned by the tree the moment they are linked in.
#[derive(Debug)]
pub struct SemanticTree {
    nodes: Vec<Node>,
    text: String,
    /// Sparse attributes (heading counts on tables, spans on cells).
    pub attrs: AttrMap,
}

impl SemanticTree {
    /// Create a new tree containing only a root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Role::Root)],
            text: String::new(),
            attrs: AttrMap::new(),
        }
    }

    /// Allocate a detached node. The node owns no position until it is
    /// linked in with append_child / insert_child_at.
    pub fn alloc_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocate a detached text node holding the given content.
    pub fn alloc_text(&mut self, content: &str) -> NodeId {
        let start = self.text.len() as u32;
        self.text.push_str(content);
        let range = TextRange::new(start, content.len() as u32);
        self.alloc_node(Node::text(range))
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Get a node's role.
    pub fn role(&self, id: NodeId) -> Option<Role> {
        self.node(id).map(|n| n.role)
    }

    /// Get the number of nodes (including the root).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the text content of a text node.
    pub fn text_of(&self, id: NodeId) -> &str {
        let Some(node) = self.node(id) else {
            return "";
        };
        let start = node.text.start as usize;
        let end = node.text.end() as usize;
        &self.text[start..end]
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        ChildIter {
            tree: self,
            current: self.node(parent).and_then(|n| n.first_child),
        }
    }

    /// Count children of a node.
    pub fn child_count(&self, parent: NodeId) -> u32 {
        self.children(parent).count() as u32
    }

    /// Get the child at the given offset, if any.
    pub fn nth_child(&self, parent: NodeId, offset: u32) -> Option<NodeId> {
        self.children(parent).nth(offset as usize)
    }

    /// Append a child at the end of a parent's child list.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let last = self.children(parent).last();
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
            node.next_sibling = None;
        }
        match last {
            Some(last_id) => {
                if let Some(last_node) = self.node_mut(last_id) {
                    last_node.next_sibling = Some(child);
                }
            }
            None => {
                if let Some(parent_node) = self.node_mut(parent) {
                    parent_node.first_child = Some(child);
                }
            }
        }
    }

    /// Insert a child at the given offset within a parent's child list.
    /// Offsets past the end append.
    pub fn insert_child_at(&mut self, parent: NodeId, offset: u32, child: NodeId) {
        if offset == 0 {
            let old_first = self.node(parent).and_then(|n| n.first_child);
            if let Some(node) = self.node_mut(child) {
                node.parent = Some(parent);
                node.next_sibling = old_first;
            }
            if let Some(parent_node) = self.node_mut(parent) {
                parent_node.first_child = Some(child);
            }
            return;
        }

        match self.nth_child(parent, offset - 1) {
            Some(prev) => {
                let next = self.node(prev).and_then(|n| n.next_sibling);
                if let Some(node) = self.node_mut(child) {
                    node.parent = Some(parent);
                    node.next_sibling = next;
                }
                if let Some(prev_node) = self.node_mut(prev) {
                    prev_node.next_sibling = Some(child);
                }
            }
            None => self.append_child(parent, child),
        }
    }

    /// Unlink a node from its parent. The node stays allocated and may be
    /// re-inserted elsewhere.
    pub fn remove_from_parent(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).and_then(|n| n.parent) else {
            return;
        };
        let next = self.node(id).and_then(|n| n.next_sibling);

        // Find the predecessor by walking the sibling chain.
        let first = self.node(parent).and_then(|n| n.first_child);
        if first == Some(id) {
            if let Some(parent_node) = self.node_mut(parent) {
                parent_node.first_child = next;
            }
        } else {
            let prev = self.children(parent).find(|&c| {
                self.node(c).and_then(|n| n.next_sibling) == Some(id)
            });
            if let Some(prev_id) = prev {
                if let Some(prev_node) = self.node_mut(prev_id) {
                    prev_node.next_sibling = next;
                }
            }
        }

        if let Some(node) = self.node_mut(id) {
            node.parent = None;
            node.next_sibling = None;
        }
    }

    /// Collect the concatenated text beneath a node, depth first.
    pub fn deep_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if self.role(id) == Some(Role::Text) {
            out.push_str(self.text_of(id));
        }
        for child in self.children(id) {
            self.collect_text(child, out);
        }
    }
}

impl Default for SemanticTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildIter<'a> {
    tree: &'a SemanticTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.node(id).and_then(|n| n.next_sibling);
        Some(id)
    }
}
