//! Result assembly.
//!
//! Once forms and fields have their winning types, fields are attached to
//! their nearest enclosing winning root (real form or synthetic cluster
//! root). Leftover fields land in the dangling bucket.

use std::collections::BTreeMap;

use formguard_core::{
    DetectedField, DetectedForm, DomSnapshot, FieldType, FormType, NodeId, Prediction,
};

/// Assemble the final prediction from per-node winners.
///
/// A noop form with no classified fields is noise and is dropped; one with
/// fields is kept, so consumers still see the fields grouped under their real
/// container. Forms and fields come out in visual order.
pub(crate) fn assemble_prediction(
    snapshot: &DomSnapshot,
    form_winners: &BTreeMap<NodeId, FormType>,
    field_winners: &BTreeMap<NodeId, FieldType>,
) -> Prediction {
    let mut members: BTreeMap<NodeId, Vec<DetectedField>> = BTreeMap::new();
    let mut dangling = Vec::new();

    for (&element, &field_type) in field_winners {
        let field = DetectedField {
            field_type,
            element,
        };
        let owner = std::iter::once(element)
            .chain(snapshot.ancestors(element))
            .find(|id| form_winners.contains_key(id));
        match owner {
            Some(root) => members.entry(root).or_default().push(field),
            None => dangling.push(field),
        }
    }

    let mut forms = Vec::new();
    for (&element, &form_type) in form_winners {
        let mut fields = members.remove(&element).unwrap_or_default();
        if form_type == FormType::Noop && fields.is_empty() {
            continue;
        }
        sort_visual(snapshot, &mut fields);
        forms.push(DetectedForm {
            form_type,
            element,
            fields,
        });
    }

    forms.sort_by(|a, b| {
        visual_key(snapshot, a.element)
            .partial_cmp(&visual_key(snapshot, b.element))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sort_visual(snapshot, &mut dangling);

    Prediction { forms, dangling }
}

fn visual_key(snapshot: &DomSnapshot, id: NodeId) -> (f64, f64, NodeId) {
    let rect = snapshot.get(id).map(|n| n.rect).unwrap_or_default();
    (rect.y, rect.x, id)
}

fn sort_visual(snapshot: &DomSnapshot, fields: &mut [DetectedField]) {
    fields.sort_by(|a, b| {
        visual_key(snapshot, a.element)
            .partial_cmp(&visual_key(snapshot, b.element))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod tests;
