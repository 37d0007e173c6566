//! Execution-time guard.
//!
//! Detection forces layout and visibility reads and can hit pathological
//! DOM shapes. The guard wraps each synchronous entry point: a slow run is
//! reported (so the host can disable detection for that site), a run past
//! the hard budget aborts. Stateless - safe to apply independently to every
//! entry point.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::error::DetectError;

/// Report passed to the bottleneck hook when a run exceeds the soft budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BottleneckReport {
    /// Measured run time in milliseconds.
    pub detection_time: u64,
    /// Hostname of the page the run executed on.
    pub hostname: String,
}

/// Callback driving telemetry / feature-disable decisions.
pub type BottleneckHook = Arc<dyn Fn(BottleneckReport) + Send + Sync>;

/// Wall-clock budget enforcement for synchronous detection work.
#[derive(Clone)]
pub struct ExecutionGuard {
    soft_budget: Duration,
    hard_budget: Duration,
    hook: Option<BottleneckHook>,
}

impl ExecutionGuard {
    pub fn new(soft_budget: Duration, hard_budget: Duration) -> Self {
        Self {
            soft_budget,
            hard_budget,
            hook: None,
        }
    }

    pub fn with_hook(mut self, hook: BottleneckHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Run `f`, measuring elapsed wall-clock time.
    ///
    /// At or past the soft budget the bottleneck hook fires (once) and the
    /// result is still returned. At or past the hard budget the result is
    /// discarded and the run fails with [`DetectError::Bottleneck`].
    pub fn run<T>(&self, hostname: &str, f: impl FnOnce() -> T) -> Result<T, DetectError> {
        let start = Instant::now();
        let out = f();
        let elapsed = start.elapsed();

        if elapsed >= self.soft_budget {
            let elapsed_ms = elapsed.as_millis() as u64;
            warn!(hostname, elapsed_ms, "detection exceeded soft budget");
            if let Some(hook) = &self.hook {
                hook(BottleneckReport {
                    detection_time: elapsed_ms,
                    hostname: hostname.to_string(),
                });
            }
            if elapsed >= self.hard_budget {
                return Err(DetectError::Bottleneck {
                    hostname: hostname.to_string(),
                    elapsed_ms,
                });
            }
        }

        Ok(out)
    }
}

impl std::fmt::Debug for ExecutionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionGuard")
            .field("soft_budget", &self.soft_budget)
            .field("hard_budget", &self.hard_budget)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
