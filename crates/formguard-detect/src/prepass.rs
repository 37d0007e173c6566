//! Structural prepass.
//!
//! Runs before any scoring and decides *what* gets scored:
//!
//! * real `<form>` elements, minus oversized ones (bulk editors, settings
//!   pages and fieldsets with dozens of inputs are never credential forms),
//! * candidate inputs, minus those inside dropped forms or rule-ignored
//!   subtrees,
//! * synthetic cluster roots for formless fields, resolved by visual
//!   proximity and rooted at the lowest common ancestor.

use std::collections::HashSet;

use formguard_core::{DomNode, DomSnapshot, NodeId};
use tracing::debug;

use crate::config::DetectorConfig;
use crate::vocab::VALID_INPUT_TYPES;

/// A group of formless fields treated as one synthetic form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cluster {
    /// Lowest common ancestor of the members; scored like a form root.
    pub root: NodeId,
    /// Member inputs, in visual order.
    pub members: Vec<NodeId>,
}

/// Prepass output: the scoring worklist.
#[derive(Debug, Default)]
pub(crate) struct Prepass {
    /// Form elements to score.
    pub forms: Vec<NodeId>,
    /// Candidate inputs to score, formless ones included.
    pub fields: Vec<NodeId>,
    /// Synthetic roots for formless field groups.
    pub clusters: Vec<Cluster>,
}

impl Prepass {
    /// Whether anything is worth running the classifier on.
    pub fn has_candidates(&self) -> bool {
        !self.fields.is_empty()
    }
}

fn is_candidate_input(node: &DomNode) -> bool {
    node.is_input() && VALID_INPUT_TYPES.contains(&node.input_type())
}

/// Build the scoring worklist for a snapshot.
///
/// `ignored` holds nodes excluded by website rules; their whole subtrees are
/// skipped. Oversized forms are dropped together with their inputs.
pub(crate) fn run(
    snapshot: &DomSnapshot,
    ignored: &HashSet<NodeId>,
    config: &DetectorConfig,
) -> Prepass {
    let skipped: HashSet<NodeId> = ignored
        .iter()
        .flat_map(|id| snapshot.descendants(*id))
        .collect();

    let mut forms = Vec::new();
    let mut dropped: HashSet<NodeId> = HashSet::new();
    for node in snapshot.iter() {
        if !node.is_form() || skipped.contains(&node.id) {
            continue;
        }
        let subtree = snapshot.descendants(node.id);
        let inputs = subtree
            .iter()
            .filter(|id| snapshot.get(**id).is_some_and(DomNode::is_input))
            .count();
        let candidates = subtree
            .iter()
            .filter(|id| snapshot.get(**id).is_some_and(is_candidate_input))
            .count();
        if inputs > config.max_inputs_per_form || candidates > config.max_fields_per_form {
            debug!(form = node.id, inputs, candidates, "dropping oversized form");
            dropped.extend(subtree);
        } else {
            forms.push(node.id);
        }
    }

    let mut fields = Vec::new();
    let mut formless = Vec::new();
    for node in snapshot.iter() {
        if !is_candidate_input(node) || skipped.contains(&node.id) || dropped.contains(&node.id) {
            continue;
        }
        fields.push(node.id);
        let in_form = snapshot
            .ancestors(node.id)
            .into_iter()
            .any(|id| snapshot.get(id).is_some_and(DomNode::is_form));
        if !in_form && node.input_type() != "hidden" {
            formless.push(node.id);
        }
    }

    let clusters = cluster_formless(snapshot, formless, config);

    Prepass {
        forms,
        fields,
        clusters,
    }
}

/// Group formless fields whose centers sit close enough to belong to one
/// visual block, then root each group at the members' lowest common ancestor.
fn cluster_formless(
    snapshot: &DomSnapshot,
    mut formless: Vec<NodeId>,
    config: &DetectorConfig,
) -> Vec<Cluster> {
    formless.sort_by(|a, b| {
        let ka = snapshot.get(*a).map(|n| (n.rect.y, n.rect.x)).unwrap_or_default();
        let kb = snapshot.get(*b).map(|n| (n.rect.y, n.rect.x)).unwrap_or_default();
        ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut groups: Vec<Vec<NodeId>> = Vec::new();
    for id in formless {
        let Some(node) = snapshot.get(id) else {
            continue;
        };
        let center = node.rect.center();
        let joined = groups.iter_mut().find(|group| {
            group.iter().any(|member| {
                snapshot.get(*member).is_some_and(|other| {
                    let (ox, oy) = other.rect.center();
                    (center.0 - ox).abs() <= config.cluster_max_dx
                        && (center.1 - oy).abs() <= config.cluster_max_dy
                })
            })
        });
        match joined {
            Some(group) => group.push(id),
            None => groups.push(vec![id]),
        }
    }

    groups
        .into_iter()
        .map(|members| {
            let root = members
                .iter()
                .copied()
                .reduce(|a, b| snapshot.common_ancestor(a, b).unwrap_or(a))
                .unwrap_or_default();
            // A root that is the field itself degrades to its parent, so the
            // cluster still has surrounding text to score against.
            let root = if members.len() == 1 {
                snapshot
                    .get(root)
                    .and_then(|n| n.parent.or(n.shadow_host))
                    .unwrap_or(root)
            } else {
                root
            };
            Cluster { root, members }
        })
        .collect()
}

#[cfg(test)]
#[path = "prepass_tests.rs"]
mod tests;
