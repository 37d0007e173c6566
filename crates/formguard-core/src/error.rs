//! Core model errors.

use thiserror::Error;

/// Errors raised while building or deserializing a snapshot.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A node references a parent id that is not part of the snapshot.
    #[error("Unknown parent node: {0}")]
    UnknownParent(u64),

    /// A node references a shadow host id that is not part of the snapshot.
    #[error("Unknown shadow host node: {0}")]
    UnknownShadowHost(u64),

    /// Duplicate node id in the snapshot input.
    #[error("Duplicate node id: {0}")]
    DuplicateNode(u64),
}
