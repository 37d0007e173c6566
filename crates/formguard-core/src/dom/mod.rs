//! DOM snapshot model.
//!
//! The host serializes the page into a flat arena of nodes with stable ids.
//! Shadow trees are represented explicitly: a shadow root has no parent but
//! carries a `shadow_host` link back to its host element, and containment
//! queries follow that link so field→form clustering stays correct inside
//! web components.

mod builder;
mod node;
mod snapshot;

pub use builder::SnapshotBuilder;
pub use node::{DomNode, DomRect, NodeAttributes};
pub use snapshot::DomSnapshot;

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
