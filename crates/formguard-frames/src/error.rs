//! Frame layer errors.

use thiserror::Error;

/// Errors from the host frame collaborators.
///
/// None of these reach the end user: enumeration failures collapse to an
/// empty frame map upstream, and query failures collapse to "not contained".
#[derive(Debug, Error)]
pub enum FrameError {
    /// The host could not enumerate the frames of a tab.
    #[error("Frame enumeration failed: {0}")]
    Enumeration(String),

    /// A cross-frame request failed in transport.
    #[error("Cross-frame query failed: {0}")]
    Query(String),

    /// A cross-frame request did not answer within its deadline.
    #[error("Cross-frame query timed out after {0}ms")]
    QueryTimeout(u64),
}
