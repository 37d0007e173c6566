//! Immutable page snapshot with shadow-aware traversal.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::CoreError;
use crate::types::NodeId;

use super::node::DomNode;

/// A flat, immutable snapshot of a document (or document subtree).
///
/// Nodes are keyed by stable host-assigned ids. The snapshot is rebuilt by
/// the host whenever the page mutates; the detector never mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<DomNode>", into = "Vec<DomNode>")]
pub struct DomSnapshot {
    nodes: BTreeMap<NodeId, DomNode>,
    roots: Vec<NodeId>,
}

impl DomSnapshot {
    /// Build a snapshot from a flat node list, recomputing child links and
    /// validating parent/shadow-host references.
    pub fn from_nodes(nodes: Vec<DomNode>) -> Result<Self, CoreError> {
        super::builder::assemble(nodes)
    }

    pub(super) fn from_parts(nodes: BTreeMap<NodeId, DomNode>, roots: Vec<NodeId>) -> Self {
        Self { nodes, roots }
    }

    pub fn get(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Document-level roots (shadow roots excluded).
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All nodes, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.values()
    }

    /// Walk ancestors of `id`, nearest first. Shadow boundaries are crossed
    /// by hopping from a shadow root to its host element. The walk carries a
    /// visited set: snapshots come from attacker-observable pages, so a
    /// malformed parent chain must terminate rather than spin.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut current = id;
        while let Some(node) = self.nodes.get(&current) {
            let next = match node.parent.or(node.shadow_host) {
                Some(next) => next,
                None => break,
            };
            if !visited.insert(next) {
                break;
            }
            out.push(next);
            current = next;
        }
        out
    }

    /// Shadow-aware containment: does `ancestor` enclose `id`?
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        ancestor == id || self.ancestors(id).contains(&ancestor)
    }

    /// Nodes of the subtree rooted at `id` (root included), in depth-first
    /// DOM order. Shadow trees hosted inside the subtree are not expanded;
    /// they are separate roots joined only through `shadow_host` links.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            out.push(current);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Lowest common ancestor of two nodes, if any.
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        if self.contains(a, b) {
            return Some(a);
        }
        let chain_b: HashSet<NodeId> = std::iter::once(b)
            .chain(self.ancestors(b))
            .collect();
        std::iter::once(a)
            .chain(self.ancestors(a))
            .find(|candidate| chain_b.contains(candidate))
    }
}

impl TryFrom<Vec<DomNode>> for DomSnapshot {
    type Error = CoreError;

    fn try_from(nodes: Vec<DomNode>) -> Result<Self, Self::Error> {
        DomSnapshot::from_nodes(nodes)
    }
}

impl From<DomSnapshot> for Vec<DomNode> {
    fn from(snapshot: DomSnapshot) -> Self {
        snapshot.nodes.into_values().collect()
    }
}
