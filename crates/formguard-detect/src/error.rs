//! Detection errors.

use thiserror::Error;

/// Errors surfaced by detection entry points.
///
/// A thrown detection call means "detection unavailable this cycle"; callers
/// disable further attempts for the page rather than retry in a loop.
#[derive(Debug, Error)]
pub enum DetectError {
    /// A run exceeded the hard execution budget.
    #[error("Detection exceeded hard budget on {hostname}: {elapsed_ms}ms")]
    Bottleneck { hostname: String, elapsed_ms: u64 },
}
