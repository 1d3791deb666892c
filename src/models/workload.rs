//! Random workload generation.
//!
//! Produces reproducible process lists for classroom exercises and
//! property-style checks. Callers supply the RNG, so a seeded
//! `SmallRng` yields the same workload on every run.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Pid, Process};

/// Parameters for a randomly generated workload.
///
/// All ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadGenerator {
    /// Number of processes to generate.
    pub count: usize,
    /// Latest possible arrival tick.
    pub max_arrival: i64,
    /// Shortest and longest burst.
    pub burst_range: (i64, i64),
    /// Lowest priority value generated (1 = highest priority).
    pub max_priority: i32,
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self {
            count: 5,
            max_arrival: 10,
            burst_range: (1, 10),
            max_priority: 5,
        }
    }
}

impl WorkloadGenerator {
    /// Creates a generator for `count` processes with default ranges.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// Sets the latest arrival tick.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the burst range.
    pub fn with_burst_range(mut self, min: i64, max: i64) -> Self {
        self.burst_range = (min, max);
        self
    }

    /// Sets the lowest priority value.
    pub fn with_max_priority(mut self, max_priority: i32) -> Self {
        self.max_priority = max_priority;
        self
    }

    /// Generates processes with pids `1..=count`.
    ///
    /// Out-of-range parameters are clamped so every generated process is
    /// valid: arrivals ≥ 0, bursts ≥ 1, priorities ≥ 1.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Process> {
        let max_arrival = self.max_arrival.max(0);
        let min_burst = self.burst_range.0.max(1);
        let max_burst = self.burst_range.1.max(min_burst);
        let max_priority = self.max_priority.max(1);

        (1..=self.count)
            .map(|i| {
                Process::new(i as Pid)
                    .with_arrival(rng.random_range(0..=max_arrival))
                    .with_burst(rng.random_range(min_burst..=max_burst))
                    .with_priority(rng.random_range(1..=max_priority))
            })
            .collect()
    }
}
