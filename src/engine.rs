//! Content-layer engine: detection wired to cross-frame trust.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use formguard_core::{DomSnapshot, Prediction};
use formguard_detect::{BottleneckHook, DetectError, Detector, DetectorConfig};
use formguard_frames::{
    AutofillableFrames, FrameEnumerator, FrameError, FrameId, TabId, autofillable_frames,
};
use formguard_rules::WebsiteRules;

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Detect(#[from] DetectError),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Per-document entry point owned by the content layer.
///
/// Wraps a [`Detector`] with the page's hostname, optional website override
/// rules and the bottleneck hook. One engine lives per document; the host
/// calls [`ContentEngine::reset`] on navigation.
#[derive(Debug)]
pub struct ContentEngine {
    detector: Detector,
}

impl ContentEngine {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            detector: Detector::new(hostname),
        }
    }

    pub fn with_config(hostname: impl Into<String>, config: DetectorConfig) -> Self {
        Self {
            detector: Detector::with_config(hostname, config),
        }
    }

    /// Install website override rules from a fetched payload. A malformed
    /// payload is logged and dropped; detection stays heuristics-only.
    pub fn with_rules_payload(mut self, payload: &str) -> Self {
        if let Some(rules) = WebsiteRules::parse(payload) {
            self.detector = self.detector.with_rules(rules);
        }
        self
    }

    pub fn with_bottleneck_hook(mut self, hook: BottleneckHook) -> Self {
        self.detector = self.detector.with_bottleneck_hook(hook);
        self
    }

    /// Staging gate for mutation-driven re-detection.
    pub async fn should_detect(&mut self, snapshot: &DomSnapshot) -> Result<bool, EngineError> {
        Ok(self.detector.should_predict(snapshot).await?)
    }

    /// Run full detection over a snapshot.
    pub fn detect(&mut self, snapshot: &DomSnapshot) -> Result<Prediction, EngineError> {
        Ok(self.detector.predict_all(snapshot)?)
    }

    /// Forget per-page state on navigation or ruleset change.
    pub fn reset(&mut self) {
        self.detector.reset();
    }
}

/// A detection result cleared for autofill in its tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillOffer {
    /// Forms and fields detected in the triggering frame.
    pub prediction: Prediction,
    /// Frames cleared to receive the fill, keyed by frame id.
    pub frames: AutofillableFrames,
}

/// Intersect a frame's detection result with the tab's frame-trust decision.
///
/// Detection alone never authorizes a fill: the triggering frame itself must
/// come out of the trust validation, otherwise the whole offer is withheld.
/// An empty prediction short-circuits without enumerating frames.
pub async fn offer_autofill<E>(
    enumerator: &E,
    tab_id: TabId,
    source_origin: &str,
    source_frame_id: FrameId,
    prediction: Prediction,
) -> Result<Option<AutofillOffer>, EngineError>
where
    E: FrameEnumerator + ?Sized,
{
    if prediction.is_empty() {
        return Ok(None);
    }

    let frames = autofillable_frames(enumerator, tab_id, source_origin, source_frame_id).await?;
    if !frames.contains_key(&source_frame_id) {
        debug!(
            tab_id,
            source_frame_id, "source frame not cleared for autofill; withholding offer"
        );
        return Ok(None);
    }

    Ok(Some(AutofillOffer { prediction, frames }))
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
