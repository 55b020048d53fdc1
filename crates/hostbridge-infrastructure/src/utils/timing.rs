//! Timing instrumentation helpers

use std::time::{Duration, Instant};

/// Tracks elapsed time of one operation
///
/// # Example
///
/// ```
/// use hostbridge_infrastructure::utils::TimedOperation;
///
/// let timer = TimedOperation::start();
/// let _ = (0..10).sum::<u32>();
/// assert!(timer.elapsed() <= timer.elapsed());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    /// Start a new timed operation
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Get elapsed time as Duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
