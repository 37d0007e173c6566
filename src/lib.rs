//! # FormGuard
//!
//! Content-layer core for a password manager browser extension: heuristic
//! form/field detection over immutable DOM snapshots, website override
//! rules, and cross-frame trust validation deciding where autofill may be
//! offered.
//!
//! The crates compose in one direction:
//!
//! - [`formguard_core`] defines the snapshot model and the classification
//!   vocabulary ([`DomSnapshot`], [`FormType`], [`FieldType`],
//!   [`Prediction`]).
//! - [`formguard_rules`] parses and applies per-domain override rulesets.
//! - [`formguard_detect`] runs the guarded classification pipeline.
//! - [`formguard_frames`] proves which frames of a tab may receive a fill.
//!
//! [`ContentEngine`] wires the detection side together for one document, and
//! [`offer_autofill`] intersects a detection result with the frame-trust
//! decision. Detection and trust stay independent on purpose: a prediction is
//! inert until the trust validator clears the frame it came from.

mod engine;

pub use engine::{AutofillOffer, ContentEngine, EngineError, offer_autofill};

pub use formguard_core::{
    CoreError, DetectedField, DetectedForm, DomNode, DomRect, DomSnapshot, FieldType, FormType,
    NodeAttributes, NodeId, Prediction, SnapshotBuilder,
};
pub use formguard_detect::{
    BottleneckHook, BottleneckReport, DetectError, Detector, DetectorConfig, ExecutionGuard,
};
pub use formguard_frames::{
    AutofillableFrame, AutofillableFrames, FrameEnumerator, FrameError, FrameId, FrameInfo,
    FrameMap, FrameMessenger, FrameNode, FrameRequest, FrameResponse, OriginResolution,
    TOP_FRAME_ID, TabId, autofillable_frames, build_frame_map, frame_form_membership, frame_path,
    tab_frames, validate_frame_path,
};
pub use formguard_rules::{FieldRule, IncludeRule, RuleOutcome, RulesVersion, WebsiteRules};
