//! Aspect-claim bookkeeping for cooperative handlers.
//!
//! Many independent handlers see the same source node; whichever acts on a
//! structural aspect of it (its name, a class, an attribute) claims that
//! aspect so no other handler re-processes it. Claims are keyed by the
//! arena's stable node ids and live only for one conversion pass.

use std::collections::{HashMap, HashSet};

use crate::dom::SourceId;

/// A named facet of a source node that can be independently claimed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Aspect {
    /// The element identity itself.
    Name,
    /// A specific class.
    Class(String),
    /// A specific attribute.
    Attribute(String),
}

impl Aspect {
    /// Claim aspect for a class.
    pub fn class(name: &str) -> Self {
        Aspect::Class(name.to_string())
    }

    /// Claim aspect for an attribute.
    pub fn attribute(name: &str) -> Self {
        Aspect::Attribute(name.to_string())
    }
}

/// Per-pass record of which aspects of which source nodes are claimed.
///
/// Pure bookkeeping: consuming without testing first is a caller bug, not a
/// runtime error. `revert` exists solely so a speculative conversion can
/// roll its own claim back.
#[derive(Debug, Default)]
pub struct Consumables {
    claimed: HashMap<SourceId, HashSet<Aspect>>,
}

impl Consumables {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff none of the requested aspects were previously consumed for
    /// this node. A false result must short-circuit the caller.
    pub fn test(&self, node: SourceId, aspects: &[Aspect]) -> bool {
        match self.claimed.get(&node) {
            Some(set) => !aspects.iter().any(|a| set.contains(a)),
            None => true,
        }
    }

    /// Mark the aspects consumed. Idempotent per aspect; callers still gate
    /// with `test` first to detect conflicts.
    pub fn consume(&mut self, node: SourceId, aspects: &[Aspect]) {
        let set = self.claimed.entry(node).or_default();
        for aspect in aspects {
            set.insert(aspect.clone());
        }
    }

    /// Clear the aspects, restoring pre-consumption state. Only the claimer
    /// of an aspect should revert it.
    pub fn revert(&mut self, node: SourceId, aspects: &[Aspect]) {
        if let Some(set) = self.claimed.get_mut(&node) {
            for aspect in aspects {
                set.remove(aspect);
            }
        }
    }
}
