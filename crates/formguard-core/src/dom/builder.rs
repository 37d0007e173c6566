//! Snapshot assembly and the fluent builder used by hosts and tests.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::types::NodeId;

use super::node::DomNode;
use super::snapshot::DomSnapshot;

/// Assemble a snapshot from a flat node list.
///
/// Child links are recomputed from parent links and ordered by geometry
/// (top-to-bottom, left-to-right), falling back to id order for zero-sized
/// nodes. Parent and shadow-host references must resolve to nodes present in
/// the list.
pub(super) fn assemble(input: Vec<DomNode>) -> Result<DomSnapshot, CoreError> {
    let mut nodes: BTreeMap<NodeId, DomNode> = BTreeMap::new();

    for mut node in input {
        node.children.clear();
        let id = node.id;
        if nodes.insert(id, node).is_some() {
            return Err(CoreError::DuplicateNode(id));
        }
    }

    let ids: Vec<NodeId> = nodes.keys().copied().collect();
    let mut roots = Vec::new();
    let mut child_links: Vec<(NodeId, NodeId)> = Vec::new();

    for id in &ids {
        let node = &nodes[id];
        if let Some(parent) = node.parent {
            if !nodes.contains_key(&parent) {
                return Err(CoreError::UnknownParent(parent));
            }
            child_links.push((parent, *id));
        } else if let Some(host) = node.shadow_host {
            if !nodes.contains_key(&host) {
                return Err(CoreError::UnknownShadowHost(host));
            }
        } else {
            roots.push(*id);
        }
    }

    for (parent, child) in child_links {
        if let Some(node) = nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    // Children accumulated in id order above; restore visual order by rect
    // position when the host provided geometry.
    for id in &ids {
        let order_key: Vec<(NodeId, (f64, f64))> = nodes[id]
            .children
            .iter()
            .map(|child| {
                let rect = nodes[child].rect;
                (*child, (rect.y, rect.x))
            })
            .collect();
        if let Some(node) = nodes.get_mut(id) {
            let mut children = order_key;
            children.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
            node.children = children.into_iter().map(|(child, _)| child).collect();
        }
    }

    Ok(DomSnapshot::from_parts(nodes, roots))
}

/// Fluent snapshot builder.
///
/// ```
/// use formguard_core::{DomNode, SnapshotBuilder};
///
/// let snapshot = SnapshotBuilder::new()
///     .node(DomNode::new(1, "form"))
///     .node(DomNode::new(2, "input").with_parent(1).with_attr("type", "password"))
///     .build()
///     .unwrap();
/// assert!(snapshot.contains(1, 2));
/// ```
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    nodes: Vec<DomNode>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, node: DomNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn nodes(mut self, nodes: impl IntoIterator<Item = DomNode>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    pub fn build(self) -> Result<DomSnapshot, CoreError> {
        assemble(self.nodes)
    }
}
