//! Feature extraction.
//!
//! Scoring never touches the snapshot directly; it reads pre-extracted
//! feature bundles. Extraction is where visibility, text gathering and
//! subtree statistics live, so the score tables stay pure functions.

use std::collections::HashMap;

use formguard_core::{DomNode, DomSnapshot, NodeId};

use crate::config::DetectorConfig;
use crate::vocab::{self, HIDDEN_ATTR_RE, VALID_INPUT_TYPES};

/// Per-run visibility memo.
///
/// Visibility of a node depends on its whole ancestor chain, so naive checks
/// are quadratic over deep trees. The cache is dropped at the end of each
/// detection run; it must never outlive the snapshot it was built against.
#[derive(Debug, Default)]
pub(crate) struct VisibilityCache {
    rendered: HashMap<NodeId, bool>,
}

impl VisibilityCache {
    /// Whether the node and every ancestor are rendered.
    fn chain_rendered(&mut self, snapshot: &DomSnapshot, id: NodeId) -> bool {
        if let Some(&known) = self.rendered.get(&id) {
            return known;
        }
        let out = match snapshot.get(id) {
            Some(node) => {
                node.rendered
                    && !node.attributes.aria_hidden
                    && !class_hidden(node)
                    && node
                        .parent
                        .or(node.shadow_host)
                        .map(|up| self.chain_rendered(snapshot, up))
                        .unwrap_or(true)
            }
            None => false,
        };
        self.rendered.insert(id, out);
        out
    }

    /// Whether a field is visible enough to interact with: rendered all the
    /// way up and at least the minimum hit-target size.
    pub(crate) fn field_visible(
        &mut self,
        snapshot: &DomSnapshot,
        id: NodeId,
        config: &DetectorConfig,
    ) -> bool {
        let Some(node) = snapshot.get(id) else {
            return false;
        };
        node.rect.width >= config.min_field_width
            && node.rect.height >= config.min_field_height
            && self.chain_rendered(snapshot, id)
    }
}

fn class_hidden(node: &DomNode) -> bool {
    node.attributes
        .class
        .as_deref()
        .is_some_and(|class| HIDDEN_ATTR_RE.is_match(&vocab::sanitize(class)))
}

/// Sanitized identifier-ish text of a node: id, name, class and data-*.
fn attr_text(node: &DomNode) -> String {
    let attrs = &node.attributes;
    let mut out = String::new();
    for part in [&attrs.id, &attrs.name, &attrs.class] {
        if let Some(value) = part {
            out.push_str(&vocab::sanitize(value));
        }
    }
    for value in attrs.data.values() {
        out.push_str(&vocab::sanitize(value));
    }
    out
}

/// Sanitized user-facing text of a node: placeholder, aria-label, own text.
fn own_text(node: &DomNode) -> String {
    let attrs = &node.attributes;
    let mut out = String::new();
    for part in [&attrs.placeholder, &attrs.aria_label] {
        if let Some(value) = part {
            out.push_str(&vocab::sanitize(value));
        }
    }
    out.push_str(&vocab::sanitize(&node.text));
    out
}

/// Everything scoring needs to know about one input element.
#[derive(Debug, Clone)]
pub(crate) struct FieldFeatures {
    /// Normalized input type.
    pub input_type: String,
    /// Sanitized id/name/class/data text.
    pub attr_text: String,
    /// Sanitized placeholder, aria-label and nearby label text.
    pub context_text: String,
    pub autocomplete: Option<String>,
    pub pattern: Option<String>,
    pub maxlength: Option<u32>,
    pub value: Option<String>,
    pub visible: bool,
    /// Nearest enclosing `<form>` element, shadow-aware.
    pub form: Option<NodeId>,
}

impl FieldFeatures {
    pub(crate) fn is_text_like(&self) -> bool {
        matches!(
            self.input_type.as_str(),
            "text" | "email" | "number" | "tel" | "search"
        )
    }

    pub(crate) fn autocomplete_is(&self, token: &str) -> bool {
        self.autocomplete
            .as_deref()
            .is_some_and(|ac| ac.split_whitespace().any(|part| part == token))
    }
}

/// Extract field features for an input node.
///
/// Context text is gathered from the field itself plus label-ish elements
/// around it (labels and plain text under the two nearest ancestors), which
/// approximates `<label for=..>` association without resolving id links.
pub(crate) fn field_features(
    snapshot: &DomSnapshot,
    node: &DomNode,
    visibility: &mut VisibilityCache,
    config: &DetectorConfig,
) -> FieldFeatures {
    let mut context = own_text(node);
    for ancestor in snapshot.ancestors(node.id).into_iter().take(2) {
        if let Some(up) = snapshot.get(ancestor) {
            context.push_str(&vocab::sanitize(&up.text));
            for child in &up.children {
                let Some(sibling) = snapshot.get(*child) else {
                    continue;
                };
                if sibling.id != node.id
                    && matches!(sibling.tag.as_str(), "label" | "span" | "p" | "legend")
                {
                    context.push_str(&vocab::sanitize(&sibling.text));
                }
            }
        }
    }

    let form = snapshot
        .ancestors(node.id)
        .into_iter()
        .find(|id| snapshot.get(*id).is_some_and(DomNode::is_form));

    FieldFeatures {
        input_type: node.input_type().to_string(),
        attr_text: attr_text(node),
        context_text: context,
        autocomplete: node.attributes.autocomplete.clone(),
        pattern: node.attributes.pattern.clone(),
        maxlength: node.attributes.maxlength,
        value: node.attributes.value.clone(),
        visible: visibility.field_visible(snapshot, node.id, config),
        form,
    }
}

/// Input population of a form subtree, reduced to the signals scoring reads.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FieldStats {
    pub visible_passwords: usize,
    /// Visible text-like inputs (text, email, tel, number, search).
    pub visible_texts: usize,
    pub emails: usize,
    /// `autocomplete="new-password"` inputs.
    pub autocomplete_new: usize,
    /// `autocomplete="current-password"` inputs.
    pub autocomplete_current: usize,
    /// Inputs whose attributes or pattern look like a one-time code.
    pub otp_like: usize,
}

/// Everything scoring needs to know about one form (or cluster root).
#[derive(Debug, Clone)]
pub(crate) struct FormFeatures {
    /// Sanitized id/name/class/action text of the root.
    pub attr_text: String,
    /// Sanitized text of buttons in the subtree, attributes included.
    pub button_text: String,
    /// Sanitized text of anchors in the subtree.
    pub link_text: String,
    /// Sanitized headings, legends and labels.
    pub heading_text: String,
    /// Remaining sanitized free text.
    pub body_text: String,
    pub stats: FieldStats,
}

impl FormFeatures {
    /// Attr, button and heading text concatenated, the usual haystack for
    /// form-intent vocabularies.
    pub(crate) fn intent_text(&self) -> String {
        let mut out = self.attr_text.clone();
        out.push_str(&self.button_text);
        out.push_str(&self.heading_text);
        out
    }
}

/// Extract form features for a form element or synthetic cluster root.
pub(crate) fn form_features(
    snapshot: &DomSnapshot,
    root: NodeId,
    visibility: &mut VisibilityCache,
    config: &DetectorConfig,
) -> FormFeatures {
    let root_node = snapshot.get(root);
    let mut attr = root_node.map(attr_text).unwrap_or_default();
    if let Some(action) = root_node.and_then(|n| n.attributes.action.as_deref()) {
        attr.push_str(&vocab::sanitize(action));
    }

    let mut button_text = String::new();
    let mut link_text = String::new();
    let mut heading_text = String::new();
    let mut body_text = String::new();
    let mut stats = FieldStats::default();

    for id in snapshot.descendants(root) {
        let Some(node) = snapshot.get(id) else {
            continue;
        };
        if node.is_input() {
            tally_input(node, &mut stats, snapshot, visibility, config);
            continue;
        }
        if node.is_button() {
            button_text.push_str(&own_text(node));
            button_text.push_str(&attr_text(node));
        } else if node.tag == "a" {
            link_text.push_str(&own_text(node));
        } else if matches!(
            node.tag.as_str(),
            "h1" | "h2" | "h3" | "h4" | "h5" | "legend" | "label"
        ) {
            heading_text.push_str(&own_text(node));
        } else if id != root {
            body_text.push_str(&vocab::sanitize(&node.text));
        }
    }

    FormFeatures {
        attr_text: attr,
        button_text,
        link_text,
        heading_text,
        body_text,
        stats,
    }
}

fn tally_input(
    node: &DomNode,
    stats: &mut FieldStats,
    snapshot: &DomSnapshot,
    visibility: &mut VisibilityCache,
    config: &DetectorConfig,
) {
    let input_type = node.input_type();
    if !VALID_INPUT_TYPES.contains(&input_type) {
        return;
    }

    let visible = visibility.field_visible(snapshot, node.id, config);
    let autocomplete = node.attributes.autocomplete.as_deref().unwrap_or("");
    match input_type {
        "password" if visible => stats.visible_passwords += 1,
        "email" => {
            stats.emails += 1;
            if visible {
                stats.visible_texts += 1;
            }
        }
        "hidden" | "password" => {}
        _ if visible => stats.visible_texts += 1,
        _ => {}
    }
    if autocomplete.split_whitespace().any(|t| t == "new-password") {
        stats.autocomplete_new += 1;
    }
    if autocomplete.split_whitespace().any(|t| t == "current-password") {
        stats.autocomplete_current += 1;
    }
    if looks_like_otp(node) {
        stats.otp_like += 1;
    }
}

fn looks_like_otp(node: &DomNode) -> bool {
    let attrs = attr_text(node);
    if vocab::OTP_ATTR_RE.is_match(&attrs) && !vocab::OTP_OUTLIER_RE.is_match(&attrs) {
        return true;
    }
    if node
        .attributes
        .autocomplete
        .as_deref()
        .is_some_and(|ac| ac.contains("one-time-code"))
    {
        return true;
    }
    node.attributes
        .pattern
        .as_deref()
        .is_some_and(|p| vocab::OTP_PATTERNS.contains(&p.replace('\\', "").as_str()))
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod tests;
