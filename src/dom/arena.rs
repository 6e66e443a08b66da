//! Arena-based source DOM for table fragments.
//!
//! html5ever parses into this arena; the conversion pass then reads it
//! without ever mutating it. All nodes live in a contiguous vector and
//! parent/child/sibling links are indices into that vector, so a
//! [`SourceId`] stays valid (and hashable) for the lifetime of the tree.

use html5ever::{LocalName, QualName};

/// Unique identifier for a node in the source arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub u32);

impl SourceId {
    /// Sentinel value for no node.
    pub const NONE: SourceId = SourceId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Node type in the source DOM.
#[derive(Debug, Clone)]
pub enum SourceData {
    /// Document root.
    Document,
    /// Element with name and attributes.
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
        /// Pre-split classes for fast matching.
        classes: Vec<String>,
    },
    /// Text content.
    Text(String),
    /// Comment (kept for TreeSink completeness, never converted).
    Comment(String),
}

/// Source attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the source DOM.
#[derive(Debug)]
pub struct SourceNode {
    pub data: SourceData,
    pub parent: SourceId,
    pub first_child: SourceId,
    pub last_child: SourceId,
    pub prev_sibling: SourceId,
    pub next_sibling: SourceId,
}

impl SourceNode {
    fn new(data: SourceData) -> Self {
        Self {
            data,
            parent: SourceId::NONE,
            first_child: SourceId::NONE,
            last_child: SourceId::NONE,
            prev_sibling: SourceId::NONE,
            next_sibling: SourceId::NONE,
        }
    }
}

/// Arena-based source DOM tree.
pub struct SourceDom {
    nodes: Vec<SourceNode>,
    document: SourceId,
}

impl SourceDom {
    /// Create a new empty DOM with a document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: SourceId::NONE,
        };
        dom.document = dom.alloc(SourceNode::new(SourceData::Document));
        dom
    }

    fn alloc(&mut self, node: SourceNode) -> SourceId {
        let id = SourceId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> SourceId {
        self.document
    }

    /// Get a node by ID.
    pub fn get(&self, id: SourceId) -> Option<&SourceNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID (tree construction only).
    pub(crate) fn get_mut(&mut self, id: SourceId) -> Option<&mut SourceNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a new element node.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> SourceId {
        let classes = attrs
            .iter()
            .find(|a| a.name.local.as_ref() == "class")
            .map(|a| {
                a.value
                    .split_whitespace()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();

        self.alloc(SourceNode::new(SourceData::Element {
            name,
            attrs,
            classes,
        }))
    }

    /// Create a new text node.
    pub fn create_text(&mut self, text: String) -> SourceId {
        self.alloc(SourceNode::new(SourceData::Text(text)))
    }

    /// Create a new comment node.
    pub fn create_comment(&mut self, text: String) -> SourceId {
        self.alloc(SourceNode::new(SourceData::Comment(text)))
    }

    /// Append a child to a parent node.
    pub fn append(&mut self, parent: SourceId, child: SourceId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(SourceId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
        }

        if last_child.is_some() {
            if let Some(last_node) = self.get_mut(last_child) {
                last_node.next_sibling = child;
            }
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a node before a sibling.
    pub fn insert_before(&mut self, sibling: SourceId, new_node: SourceId) {
        let parent = self
            .get(sibling)
            .map(|n| n.parent)
            .unwrap_or(SourceId::NONE);
        let prev = self
            .get(sibling)
            .map(|n| n.prev_sibling)
            .unwrap_or(SourceId::NONE);

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Append text to an existing text node, or create new if last child isn't text.
    pub fn append_text(&mut self, parent: SourceId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(SourceId::NONE);

        if let Some(last) = self.get_mut(last_child) {
            if let SourceData::Text(ref mut existing) = last.data {
                existing.push_str(text);
                return;
            }
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Get the number of nodes (including the document root).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: SourceId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(SourceId::NONE);
        ChildrenIter {
            dom: self,
            current: first,
        }
    }

    /// Find the first node matching a predicate (DFS, document order).
    pub fn find<F>(&self, predicate: F) -> Option<SourceId>
    where
        F: Fn(&SourceDom, SourceId) -> bool,
    {
        let mut stack = vec![self.document];
        while let Some(id) = stack.pop() {
            if predicate(self, id) {
                return Some(id);
            }
            let mut children: Vec<_> = self.children(id).collect();
            children.reverse();
            stack.extend(children);
        }
        None
    }

    /// Find element by tag name (first match in document order).
    pub fn find_by_tag(&self, tag: &str) -> Option<SourceId> {
        self.find(|dom, id| dom.element_name(id).is_some_and(|n| n.as_ref() == tag))
    }
}

impl Default for SourceDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    dom: &'a SourceDom,
    current: SourceId,
}

impl<'a> Iterator for ChildrenIter<'a> {
    type Item = SourceId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(SourceId::NONE);
        Some(id)
    }
}

/// Read accessors used by the conversion pass.
impl SourceDom {
    /// Get element's local name (tag).
    pub fn element_name(&self, id: SourceId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            SourceData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// Check whether an element has the given local name.
    pub fn is_named(&self, id: SourceId, tag: &str) -> bool {
        self.element_name(id).is_some_and(|n| n.as_ref() == tag)
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: SourceId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            SourceData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    /// Check whether an element carries the given class.
    pub fn has_class(&self, id: SourceId, class: &str) -> bool {
        self.get(id).is_some_and(|n| match &n.data {
            SourceData::Element { classes, .. } => classes.iter().any(|c| c == class),
            _ => false,
        })
    }

    /// Check if node is an element.
    pub fn is_element(&self, id: SourceId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, SourceData::Element { .. }))
    }

    /// Check if node is a text node.
    pub fn is_text(&self, id: SourceId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, SourceData::Text(_)))
    }

    /// Get text content of a text node.
    pub fn text_content(&self, id: SourceId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            SourceData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Content emptiness: no element children and no non-whitespace text
    /// children. Indentation between tags parses into text nodes; it does
    /// not count as content.
    pub fn is_empty(&self, id: SourceId) -> bool {
        self.children(id).all(|child| {
            match self.get(child).map(|n| &n.data) {
                Some(SourceData::Element { .. }) => false,
                Some(SourceData::Text(s)) => s.trim().is_empty(),
                _ => true,
            }
        })
    }
}
