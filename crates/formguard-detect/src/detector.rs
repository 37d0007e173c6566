//! Detection orchestrator.

use std::collections::{BTreeMap, HashSet};

use formguard_core::{DomSnapshot, FormType, NodeId, Prediction};
use formguard_rules::{RuleOutcome, WebsiteRules, apply_rules};
use tracing::debug;

use crate::cluster;
use crate::config::DetectorConfig;
use crate::error::DetectError;
use crate::features::{self, VisibilityCache};
use crate::guard::{BottleneckHook, ExecutionGuard};
use crate::prepass;
use crate::score;
use crate::tiebreak;

/// Stateful per-page detector.
///
/// One instance lives per document. It keeps an explicit ledger of node ids
/// already processed or ignored, keyed by the stable host-assigned ids, so
/// repeated runs over an unchanged page become cheap no-ops in
/// [`Detector::should_predict`]. [`Detector::reset`] clears the ledgers when
/// the host detects a navigation or a ruleset change.
#[derive(Debug)]
pub struct Detector {
    hostname: String,
    config: DetectorConfig,
    guard: ExecutionGuard,
    rules: Option<WebsiteRules>,
    processed: HashSet<NodeId>,
    ignored: HashSet<NodeId>,
}

impl Detector {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self::with_config(hostname, DetectorConfig::default())
    }

    pub fn with_config(hostname: impl Into<String>, config: DetectorConfig) -> Self {
        let guard = ExecutionGuard::new(config.soft_budget, config.hard_budget);
        Self {
            hostname: hostname.into(),
            config,
            guard,
            rules: None,
            processed: HashSet::new(),
            ignored: HashSet::new(),
        }
    }

    /// Install website override rules for this page.
    pub fn with_rules(mut self, rules: WebsiteRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Install the slow-run callback.
    pub fn with_bottleneck_hook(mut self, hook: BottleneckHook) -> Self {
        self.guard = self.guard.clone().with_hook(hook);
        self
    }

    /// Forget everything learned about the current page.
    pub fn reset(&mut self) {
        self.processed.clear();
        self.ignored.clear();
    }

    /// Run full detection over a snapshot.
    ///
    /// Rules first, then the structural prepass, then per-type scoring with
    /// tie-break, then field classification in the winning form's context,
    /// then clustering into the final [`Prediction`]. The whole pipeline runs
    /// under the execution guard.
    pub fn predict_all(&mut self, snapshot: &DomSnapshot) -> Result<Prediction, DetectError> {
        let guard = self.guard.clone();
        let hostname = self.hostname.clone();
        guard.run(&hostname, || self.run_pipeline(snapshot))
    }

    /// Cheap staging gate for mutation-driven re-runs.
    ///
    /// Sleeps out the DOM-settle window and yields once so a burst of
    /// mutation events collapses into a single check, then reports whether
    /// any processable candidate exists that previous runs have not covered.
    pub async fn should_predict(&mut self, snapshot: &DomSnapshot) -> Result<bool, DetectError> {
        tokio::time::sleep(self.config.dom_settle).await;
        tokio::task::yield_now().await;

        let guard = self.guard.clone();
        let hostname = self.hostname.clone();
        guard.run(&hostname, || {
            self.apply_page_rules(snapshot);
            let prepass = prepass::run(snapshot, &self.ignored, &self.config);
            prepass.has_candidates()
                && prepass
                    .fields
                    .iter()
                    .any(|id| !self.processed.contains(id))
        })
    }

    fn apply_page_rules(&mut self, snapshot: &DomSnapshot) -> RuleOutcome {
        let outcome = self
            .rules
            .as_ref()
            .map(|rules| apply_rules(rules, snapshot))
            .unwrap_or_default();
        self.ignored.extend(outcome.ignored.iter().copied());
        outcome
    }

    fn run_pipeline(&mut self, snapshot: &DomSnapshot) -> Prediction {
        let outcome = self.apply_page_rules(snapshot);
        let prepass = prepass::run(snapshot, &self.ignored, &self.config);
        let mut visibility = VisibilityCache::default();

        let mut form_winners: BTreeMap<NodeId, FormType> = BTreeMap::new();
        let roots = prepass
            .forms
            .iter()
            .copied()
            .chain(prepass.clusters.iter().map(|c| c.root));
        for root in roots {
            if let Some(&forced) = outcome.forms.get(&root) {
                form_winners.insert(root, forced);
                continue;
            }
            let feats = features::form_features(snapshot, root, &mut visibility, &self.config);
            let candidates: Vec<(FormType, f64)> = FormType::SCORED
                .into_iter()
                .map(|ty| (ty, score::form_score(&feats, ty)))
                .filter(|(_, s)| *s >= self.config.score_threshold)
                .collect();
            let winner = tiebreak::select_best_form(&candidates, self.config.tiebreak_tolerance)
                .unwrap_or(FormType::Noop);
            form_winners.insert(root, winner);
        }
        // Rule-forced containers that are neither forms nor cluster roots.
        for (&node, &forced) in &outcome.forms {
            form_winners.entry(node).or_insert(forced);
        }

        let mut field_winners = BTreeMap::new();
        for id in &prepass.fields {
            if let Some(&forced) = outcome.fields.get(id) {
                field_winners.insert(*id, forced);
                continue;
            }
            let Some(node) = snapshot.get(*id) else {
                continue;
            };
            let feats = features::field_features(snapshot, node, &mut visibility, &self.config);
            // Nearest enclosing form first, then any winning cluster root.
            let context = feats
                .form
                .and_then(|form| form_winners.get(&form).copied())
                .or_else(|| {
                    snapshot
                        .ancestors(*id)
                        .into_iter()
                        .find_map(|up| form_winners.get(&up).copied())
                })
                .unwrap_or(FormType::Noop);
            if let Some(field_type) = score::classify_field(&feats, context, &self.config) {
                field_winners.insert(*id, field_type);
            }
        }
        for (&node, &forced) in &outcome.fields {
            field_winners.entry(node).or_insert(forced);
        }

        self.processed.extend(prepass.fields.iter().copied());
        self.processed.extend(form_winners.keys().copied());

        let prediction = cluster::assemble_prediction(snapshot, &form_winners, &field_winners);
        debug!(
            hostname = %self.hostname,
            forms = prediction.forms.len(),
            fields = prediction.field_count(),
            "detection run complete"
        );
        prediction
    }
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod tests;
