//! Ruleset application over a snapshot.

use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use formguard_core::{DomSnapshot, FieldType, FormType, NodeId};

use crate::model::{RulesVersion, WebsiteRules};
use crate::selector::Selector;

/// The effect of one ruleset application: flags the detector consumes before
/// running heuristics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOutcome {
    /// Nodes suppressed from classification (excluded subtrees).
    pub ignored: HashSet<NodeId>,
    /// Forced form-type assignments (include rules, v2 only).
    pub forms: HashMap<NodeId, FormType>,
    /// Forced field-type assignments (include rules, v2 only).
    pub fields: HashMap<NodeId, FieldType>,
}

impl RuleOutcome {
    pub fn is_empty(&self) -> bool {
        self.ignored.is_empty() && self.forms.is_empty() && self.fields.is_empty()
    }
}

/// Apply a ruleset to a snapshot.
///
/// Exclude selectors flag their whole subtree as ignored. Include rules
/// (version 2 only) force-assign types; field selectors are scoped to the
/// matched form's subtree. Individual selectors that fail to parse are
/// skipped, keeping the rest of the ruleset effective.
pub fn apply_rules(rules: &WebsiteRules, snapshot: &DomSnapshot) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for raw in &rules.exclude {
        let Some(selector) = parse_logged(raw) else {
            continue;
        };
        for node in snapshot.iter() {
            if selector.matches(snapshot, node.id) {
                outcome.ignored.extend(snapshot.descendants(node.id));
            }
        }
    }

    if rules.version != RulesVersion::V2 {
        return outcome;
    }

    for include in &rules.include {
        let Some(selector) = parse_logged(&include.selector) else {
            continue;
        };
        for node in snapshot.iter() {
            if !selector.matches(snapshot, node.id) {
                continue;
            }
            debug!(node = node.id, form_type = ?include.form_type, "rule-forced form");
            outcome.forms.insert(node.id, include.form_type);

            for field_rule in &include.fields {
                let Some(field_selector) = parse_logged(&field_rule.selector) else {
                    continue;
                };
                for candidate in snapshot.descendants(node.id) {
                    if field_selector.matches(snapshot, candidate) {
                        outcome.fields.insert(candidate, field_rule.field_type);
                    }
                }
            }
        }
    }

    outcome
}

fn parse_logged(raw: &str) -> Option<Selector> {
    let parsed = Selector::parse(raw);
    if parsed.is_none() {
        warn!(selector = raw, "skipping unparseable rule selector");
    }
    parsed
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod tests;
