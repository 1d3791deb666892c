//! Scheduling context for dispatching rule evaluation.

/// Runtime scheduling state passed to dispatching rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulingContext {
    /// Current simulation clock (ticks).
    pub current_time: i64,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: i64) -> Self {
        Self { current_time }
    }

    /// Ticks a process has spent waiting since arrival, clamped at 0.
    pub fn waited(&self, arrival: i64) -> i64 {
        (self.current_time - arrival).max(0)
    }
}
