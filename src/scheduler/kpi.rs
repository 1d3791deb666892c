//! Per-process timing metrics and aggregate statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion − arrival |
//! | Waiting | turnaround − burst (time ready but not running) |
//! | Response | first dispatch − arrival |
//!
//! Arrival is always the process's original arrival, never a requeue time.
//! For non-preemptive disciplines waiting equals response. Round-Robin
//! overrides waiting with its own accrual (see [`ProcessMetrics::with_waiting`]).

use serde::{Deserialize, Serialize};

use crate::models::{Pid, Process};

/// Timing metrics of one completed process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process identifier.
    pub pid: Pid,
    /// Original arrival time.
    pub arrival: i64,
    /// Burst time.
    pub burst: i64,
    /// Tick of the first dispatch.
    pub first_start: i64,
    /// Tick at which the last burst slice ended.
    pub completion: i64,
    /// Time spent ready but not running.
    pub waiting: i64,
    /// Completion minus arrival.
    pub turnaround: i64,
    /// First dispatch minus arrival.
    pub response: i64,
}

impl ProcessMetrics {
    /// Derives metrics from a process's first dispatch and completion time.
    pub fn new(process: &Process, first_start: i64, completion: i64) -> Self {
        let turnaround = completion - process.arrival;
        Self {
            pid: process.pid,
            arrival: process.arrival,
            burst: process.burst,
            first_start,
            completion,
            waiting: turnaround - process.burst,
            turnaround,
            response: first_start - process.arrival,
        }
    }

    /// Replaces the derived waiting time.
    pub fn with_waiting(mut self, waiting: i64) -> Self {
        self.waiting = waiting;
        self
    }
}

/// Aggregate scheduling statistics.
///
/// All averages are 0 for an empty process set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStats {
    /// Mean waiting time.
    #[serde(rename = "avg_wt")]
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    #[serde(rename = "avg_tat")]
    pub avg_turnaround_time: f64,
    /// Mean response time.
    #[serde(rename = "avg_rt")]
    pub avg_response_time: f64,
}

impl ScheduleStats {
    /// Averages per-process metrics.
    pub fn calculate(metrics: &[ProcessMetrics]) -> Self {
        if metrics.is_empty() {
            return Self::default();
        }

        let n = metrics.len() as f64;
        // Widened so sums over many long-running processes cannot overflow.
        let mean = |f: fn(&ProcessMetrics) -> i64| {
            metrics.iter().map(|m| i128::from(f(m))).sum::<i128>() as f64 / n
        };

        Self {
            avg_waiting_time: mean(|m| m.waiting),
            avg_turnaround_time: mean(|m| m.turnaround),
            avg_response_time: mean(|m| m.response),
        }
    }
}
