//! # FormGuard Detect
//!
//! Rule-based form/field classifier for login, registration, password-change,
//! recovery and MFA flows.
//!
//! A detection run is a synchronous pass over an immutable [DOM
//! snapshot](formguard_core::DomSnapshot):
//!
//! 1. Website override rules are applied first - excluded subtrees never
//!    reach the classifier, force-included nodes bypass it.
//! 2. A cheap prepass drops noise (oversized forms, junk hidden inputs) and
//!    resolves clusters of formless fields under a common ancestor.
//! 3. Every remaining candidate is scored against a fixed table of
//!    `(type, element) → score` functions; scores above the threshold become
//!    candidates.
//! 4. A deterministic tie-break reduces candidates to one winner per
//!    element, biased toward the least-destructive autofill action (login).
//! 5. Winning fields are clustered under their nearest enclosing winning
//!    form; leftovers land in a dangling bucket.
//!
//! Every externally-invoked entry point runs under an
//! [`ExecutionGuard`]: a slow run is reported through the bottleneck hook,
//! a pathological one aborts with [`DetectError::Bottleneck`] so a single
//! hostile page cannot stall the content script.

mod cluster;
mod config;
mod detector;
mod error;
mod features;
mod guard;
mod prepass;
mod score;
mod tiebreak;
mod vocab;

pub use config::DetectorConfig;
pub use detector::Detector;
pub use error::DetectError;
pub use guard::{BottleneckHook, BottleneckReport, ExecutionGuard};
pub use tiebreak::select_best_form;
