//! Handler registration and conversion dispatch.
//!
//! Conversion is a cooperative effort: handlers register for a source node
//! kind with a priority, and dispatch walks the matching handlers in order
//! until one stops the chain. Handlers that want children converted call
//! back into the dispatcher; that recursion is the only sanctioned path into
//! nested conversion, so the whole pass stays a single synchronous
//! depth-first descent.

use std::collections::HashMap;

use crate::dom::{SourceDom, SourceId};
use crate::model::{Node, NodeId, Role, SemanticTree, schema};

use super::consumable::Consumables;

/// Handler priority. Dispatch runs High, then Normal, then Low; within one
/// priority, registration order decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,
    Normal,
    Low,
}

/// What a handler did with the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Handled; suppress all later handlers for this node.
    Stop,
    /// Handled; later handlers may still inspect or extend the result.
    Continue,
    /// Not handled; the next handler gets a clean shot.
    Pass,
}

/// A position in the semantic tree: a parent node plus a child offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub parent: NodeId,
    pub offset: u32,
}

impl Position {
    /// Position at a fixed offset inside a parent.
    pub fn new(parent: NodeId, offset: u32) -> Self {
        Self { parent, offset }
    }

    /// Position after the last existing child of a parent.
    pub fn end(tree: &SemanticTree, parent: NodeId) -> Self {
        Self {
            parent,
            offset: tree.child_count(parent),
        }
    }

    /// The position `n` slots further along in the same parent.
    pub fn advanced(self, n: u32) -> Self {
        Self {
            parent: self.parent,
            offset: self.offset + n,
        }
    }
}

/// The outcome of dispatching one source node: the semantic nodes produced
/// at the top level (possibly none) and the updated cursor.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub produced: Vec<NodeId>,
    pub cursor: Position,
}

impl Conversion {
    /// An empty result at the given cursor.
    pub fn none(cursor: Position) -> Self {
        Self {
            produced: Vec::new(),
            cursor,
        }
    }

    /// The first produced node, if any.
    pub fn first(&self) -> Option<NodeId> {
        self.produced.first().copied()
    }

    /// True if nothing was produced.
    pub fn is_unconverted(&self) -> bool {
        self.produced.is_empty()
    }
}

/// Mutable state of one conversion pass: the read-only source, the output
/// tree, and the consumption record. All of it is scoped to a single
/// top-level pass and discarded afterward.
pub struct Pass<'a> {
    pub source: &'a SourceDom,
    pub output: &'a mut SemanticTree,
    pub consumed: Consumables,
}

impl<'a> Pass<'a> {
    /// Start a fresh pass over `source`, writing into `output`.
    pub fn new(source: &'a SourceDom, output: &'a mut SemanticTree) -> Self {
        Self {
            source,
            output,
            consumed: Consumables::new(),
        }
    }

    /// Insert a new node of the given role at a position, but only if the
    /// destination schema allows that placement. Returns None on rejection
    /// and mutates nothing in that case.
    pub fn safe_insert(&mut self, pos: Position, role: Role) -> Option<NodeId> {
        let parent_role = self.output.role(pos.parent)?;
        if !schema::allows(parent_role, role) {
            return None;
        }
        let id = self.output.alloc_node(Node::new(role));
        self.output.insert_child_at(pos.parent, pos.offset, id);
        Some(id)
    }

    /// Schema-gated insertion of a text node.
    pub fn safe_insert_text(&mut self, pos: Position, content: &str) -> Option<NodeId> {
        let parent_role = self.output.role(pos.parent)?;
        if !schema::allows(parent_role, Role::Text) {
            return None;
        }
        let id = self.output.alloc_text(content);
        self.output.insert_child_at(pos.parent, pos.offset, id);
        Some(id)
    }
}

/// Conversion handler: inspects a source node, may claim aspects of it and
/// extend the in-flight [`Conversion`], and reports how dispatch should
/// proceed.
pub type Handler = Box<dyn Fn(&Converter, &mut Pass<'_>, SourceId, &mut Conversion) -> Flow>;

struct Registered {
    priority: Priority,
    seq: u32,
    handler: Handler,
}

/// Handler registry and dispatch engine.
///
/// Registration is keyed by source element name, by the any-element
/// wildcard, or by the text kind. For a fixed registration order dispatch is
/// deterministic: repeated runs over an unchanged source tree produce a
/// structurally identical semantic tree.
#[derive(Default)]
pub struct Converter {
    element: HashMap<String, Vec<Registered>>,
    any_element: Vec<Registered>,
    text: Vec<Registered>,
    seq: u32,
}

impl Converter {
    /// Create a converter with no handlers registered.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&mut self) -> u32 {
        let seq = self.seq;
        self.seq += 1;
        seq
    }

    /// Register a handler for elements with the given local name.
    pub fn on_element<F>(&mut self, name: &str, priority: Priority, handler: F)
    where
        F: Fn(&Converter, &mut Pass<'_>, SourceId, &mut Conversion) -> Flow + 'static,
    {
        let seq = self.next_seq();
        self.element.entry(name.to_string()).or_default().push(Registered {
            priority,
            seq,
            handler: Box::new(handler),
        });
    }

    /// Register a handler for any element, regardless of name.
    pub fn on_any_element<F>(&mut self, priority: Priority, handler: F)
    where
        F: Fn(&Converter, &mut Pass<'_>, SourceId, &mut Conversion) -> Flow + 'static,
    {
        let seq = self.next_seq();
        self.any_element.push(Registered {
            priority,
            seq,
            handler: Box::new(handler),
        });
    }

    /// Register a handler for text nodes.
    pub fn on_text<F>(&mut self, priority: Priority, handler: F)
    where
        F: Fn(&Converter, &mut Pass<'_>, SourceId, &mut Conversion) -> Flow + 'static,
    {
        let seq = self.next_seq();
        self.text.push(Registered {
            priority,
            seq,
            handler: Box::new(handler),
        });
    }

    /// Dispatch one source node to its matching handlers, in descending
    /// priority order, stopping early if a handler stops the chain. Returns
    /// what was produced and the cursor after it.
    pub fn convert(&self, pass: &mut Pass<'_>, node: SourceId, cursor: Position) -> Conversion {
        let mut out = Conversion::none(cursor);
        let source = pass.source;

        let chain: Vec<&Registered> = if source.is_text(node) {
            self.text.iter().collect()
        } else if let Some(name) = source.element_name(node) {
            let mut chain: Vec<&Registered> = self
                .element
                .get(name.as_ref())
                .map(|regs| regs.iter().collect())
                .unwrap_or_default();
            chain.extend(self.any_element.iter());
            chain
        } else {
            // Comments and the document node convert to nothing
            return out;
        };

        let mut ordered = chain;
        ordered.sort_by_key(|reg| (reg.priority, reg.seq));

        for reg in ordered {
            match (reg.handler)(self, pass, node, &mut out) {
                Flow::Stop => break,
                Flow::Continue | Flow::Pass => continue,
            }
        }
        out
    }

    /// Dispatch every child of a source node in order, threading the cursor
    /// through. The accumulated result covers all children.
    pub fn convert_children(
        &self,
        pass: &mut Pass<'_>,
        parent: SourceId,
        cursor: Position,
    ) -> Conversion {
        let source = pass.source;
        let mut out = Conversion::none(cursor);
        for child in source.children(parent) {
            let converted = self.convert(pass, child, out.cursor);
            out.produced.extend(converted.produced);
            out.cursor = converted.cursor;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use html5ever::{LocalName, QualName, ns};

    use super::*;

    fn element_dom(tags: &[&str]) -> (SourceDom, Vec<SourceId>) {
        let mut dom = SourceDom::new();
        let ids = tags
            .iter()
            .map(|tag| {
                let id = dom.create_element(
                    QualName::new(None, ns!(html), LocalName::from(*tag)),
                    vec![],
                );
                dom.append(dom.document(), id);
                id
            })
            .collect();
        (dom, ids)
    }

    #[test]
    fn test_priority_order() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut converter = Converter::new();

        for (priority, label) in [
            (Priority::Low, "low"),
            (Priority::High, "high"),
            (Priority::Normal, "normal"),
        ] {
            let calls = calls.clone();
            converter.on_element("tr", priority, move |_, _, _, _| {
                calls.borrow_mut().push(label);
                Flow::Continue
            });
        }

        let (dom, ids) = element_dom(&["tr"]);
        let mut tree = SemanticTree::new();
        let mut pass = Pass::new(&dom, &mut tree);
        converter.convert(&mut pass, ids[0], Position::new(NodeId::ROOT, 0));

        assert_eq!(*calls.borrow(), vec!["high", "normal", "low"]);
    }

    #[test]
    fn test_stop_suppresses_equal_and_lower() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut converter = Converter::new();

        {
            let calls = calls.clone();
            converter.on_element("tr", Priority::Normal, move |_, _, _, _| {
                calls.borrow_mut().push("first");
                Flow::Stop
            });
        }
        {
            let calls = calls.clone();
            converter.on_element("tr", Priority::Normal, move |_, _, _, _| {
                calls.borrow_mut().push("second");
                Flow::Continue
            });
        }
        {
            let calls = calls.clone();
            converter.on_element("tr", Priority::Low, move |_, _, _, _| {
                calls.borrow_mut().push("low");
                Flow::Continue
            });
        }

        let (dom, ids) = element_dom(&["tr"]);
        let mut tree = SemanticTree::new();
        let mut pass = Pass::new(&dom, &mut tree);
        converter.convert(&mut pass, ids[0], Position::new(NodeId::ROOT, 0));

        assert_eq!(*calls.borrow(), vec!["first"]);
    }

    #[test]
    fn test_wildcard_merges_with_named() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut converter = Converter::new();

        {
            let calls = calls.clone();
            converter.on_any_element(Priority::High, move |_, _, _, _| {
                calls.borrow_mut().push("wildcard");
                Flow::Continue
            });
        }
        {
            let calls = calls.clone();
            converter.on_element("table", Priority::Normal, move |_, _, _, _| {
                calls.borrow_mut().push("table");
                Flow::Continue
            });
        }

        let (dom, ids) = element_dom(&["table"]);
        let mut tree = SemanticTree::new();
        let mut pass = Pass::new(&dom, &mut tree);
        converter.convert(&mut pass, ids[0], Position::new(NodeId::ROOT, 0));

        assert_eq!(*calls.borrow(), vec!["wildcard", "table"]);
    }

    #[test]
    fn test_safe_insert_rejects_bad_placement() {
        let (dom, _) = element_dom(&[]);
        let mut tree = SemanticTree::new();
        let mut pass = Pass::new(&dom, &mut tree);

        // A row may not sit directly under the root
        let rejected = pass.safe_insert(Position::new(NodeId::ROOT, 0), Role::TableRow);
        assert_eq!(rejected, None);
        assert_eq!(pass.output.child_count(NodeId::ROOT), 0);

        let table = pass
            .safe_insert(Position::new(NodeId::ROOT, 0), Role::Table)
            .expect("table belongs in root");
        assert!(pass.safe_insert(Position::new(table, 0), Role::TableRow).is_some());
    }
}
