//! # FormGuard Core
//!
//! Shared data model for the FormGuard content layer.
//!
//! The detection engine never touches a live DOM: the host (content script,
//! CDP bridge, test harness) serializes the page into a [`DomSnapshot`], an
//! arena of nodes with stable host-assigned ids, and every classification
//! pass runs against that immutable snapshot. This keeps the classifier
//! deterministic and testable, and makes element identity auditable across
//! repeated runs on a mutating page.
//!
//! ## Types
//!
//! - [`DomSnapshot`], [`DomNode`], [`NodeAttributes`], [`DomRect`] - the page
//!   snapshot consumed by the detector.
//! - [`FormType`], [`FieldType`] - the closed classification vocabulary.
//! - [`DetectedForm`], [`DetectedField`], [`Prediction`] - detection output.

mod dom;
mod error;
mod types;

pub use dom::{DomNode, DomRect, DomSnapshot, NodeAttributes, SnapshotBuilder};
pub use error::CoreError;
pub use types::{DetectedField, DetectedForm, FieldType, FormType, NodeId, Prediction};
