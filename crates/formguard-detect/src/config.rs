//! Detector configuration.

use std::time::Duration;

/// Detector tuning knobs.
///
/// Defaults mirror the production heuristics; tests construct isolated
/// instances with whatever they need.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Soft execution budget; exceeding it fires the bottleneck hook.
    pub soft_budget: Duration,
    /// Hard execution budget; exceeding it aborts the run.
    pub hard_budget: Duration,
    /// Delay before `should_predict` samples the DOM, letting mutations
    /// settle.
    pub dom_settle: Duration,
    /// Minimum score for an `(element, type)` pair to become a candidate.
    pub score_threshold: f64,
    /// Score delta treated as a tie between password-change and register
    /// form candidates.
    pub tiebreak_tolerance: f64,
    /// Minimum rendered size for a field to count as visible.
    pub min_field_width: f64,
    pub min_field_height: f64,
    /// Forms with more inputs than this are ignored as noise.
    pub max_inputs_per_form: usize,
    pub max_fields_per_form: usize,
    /// Hidden inputs with values longer than this are ignored.
    pub max_hidden_value_len: usize,
    /// Maximum horizontal/vertical center distance for two formless fields
    /// to cluster under one synthetic form.
    pub cluster_max_dx: f64,
    pub cluster_max_dy: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            soft_budget: Duration::from_millis(50),
            hard_budget: Duration::from_millis(1000),
            dom_settle: Duration::from_millis(250),
            score_threshold: 0.5,
            tiebreak_tolerance: 0.01,
            min_field_width: 30.0,
            min_field_height: 15.0,
            max_inputs_per_form: 40,
            max_fields_per_form: 60,
            max_hidden_value_len: 320,
            cluster_max_dx: 50.0,
            cluster_max_dy: 140.0,
        }
    }
}
