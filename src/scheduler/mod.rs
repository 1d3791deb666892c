//! CPU scheduling simulators and statistics.
//!
//! Every simulator is a pure function from a process list (plus a quantum
//! for Round-Robin) to a [`SimulationResult`]: the CPU timeline, per-process
//! metrics, and their averages.
//!
//! # Algorithms
//!
//! | Algorithm | Preemptive | Selection |
//! |-----------|------------|-----------|
//! | FCFS | no | earliest arrival |
//! | SJF | no | shortest burst among arrived |
//! | Priority | no | lowest priority value among arrived |
//! | RR | yes | FIFO queue, fixed quantum |
//!
//! When nothing is ready the clock jumps straight to the next arrival.
//!
//! [`run_schedule`] is the validated entry point: it checks the process
//! list and quantum before dispatching to an algorithm. The individual
//! algorithm functions assume valid input.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod algorithm;
mod dispatch;
mod fcfs;
mod kpi;
mod round_robin;
mod suggest;

pub use algorithm::Algorithm;
pub use dispatch::{priority, sjf, DispatchScheduler};
pub use fcfs::fcfs;
pub use kpi::{ProcessMetrics, ScheduleStats};
pub use round_robin::round_robin;
pub use suggest::suggest_algorithm;

use std::num::NonZeroU32;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Pid, Process, Schedule};
use crate::validation::{validate_processes, ValidationError};

/// Errors raised at the scheduling boundary.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Round Robin requires a time quantum")]
    MissingQuantum,
    #[error("Time quantum must be a positive integer (got {0})")]
    InvalidQuantum(i64),
    #[error("Invalid process list: {}", join_messages(.0))]
    InvalidProcess(Vec<ValidationError>),
    #[error("Unknown scheduling algorithm: {0}")]
    UnknownAlgorithm(String),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Output of a scheduling simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// CPU timeline in execution order.
    pub schedule: Schedule,
    /// Aggregate statistics.
    pub stats: ScheduleStats,
    /// Per-process metrics, in input order.
    pub metrics: Vec<ProcessMetrics>,
}

impl SimulationResult {
    /// Builds a result, deriving the averages from the metrics.
    pub fn new(schedule: Schedule, metrics: Vec<ProcessMetrics>) -> Self {
        let stats = ScheduleStats::calculate(&metrics);
        Self {
            schedule,
            stats,
            metrics,
        }
    }

    /// Metrics of one process.
    pub fn metrics_for(&self, pid: Pid) -> Option<&ProcessMetrics> {
        self.metrics.iter().find(|m| m.pid == pid)
    }

    /// Splits into the `(schedule, stats)` pair.
    pub fn into_parts(self) -> (Schedule, ScheduleStats) {
        (self.schedule, self.stats)
    }
}

/// Converts a user-supplied quantum into a validated one.
pub fn parse_quantum(quantum: i64) -> Result<NonZeroU32, SimulationError> {
    u32::try_from(quantum)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(SimulationError::InvalidQuantum(quantum))
}

/// Validates input and runs the chosen algorithm.
///
/// `quantum` is only consulted (and then required) for Round-Robin.
///
/// # Errors
/// - [`SimulationError::InvalidProcess`] if any process violates its
///   field constraints, pids repeat, or the timeline would exceed
///   [`MAX_HORIZON`](crate::validation::MAX_HORIZON).
/// - [`SimulationError::MissingQuantum`] / [`SimulationError::InvalidQuantum`]
///   for Round-Robin without a positive quantum.
pub fn run_schedule(
    algorithm: Algorithm,
    processes: &[Process],
    quantum: Option<i64>,
) -> Result<SimulationResult, SimulationError> {
    validate_processes(processes).map_err(SimulationError::InvalidProcess)?;

    debug!(
        "running {} over {} processes",
        algorithm.tag(),
        processes.len()
    );

    let result = match algorithm {
        Algorithm::Fcfs => fcfs(processes),
        Algorithm::Sjf => sjf(processes),
        Algorithm::Priority => priority(processes),
        Algorithm::RoundRobin => {
            let quantum = quantum.ok_or(SimulationError::MissingQuantum)?;
            round_robin(processes, parse_quantum(quantum)?)
        }
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_process(pid: Pid, arrival: i64, burst: i64, priority: i32) -> Process {
        Process::new(pid)
            .with_arrival(arrival)
            .with_burst(burst)
            .with_priority(priority)
    }

    fn two_processes() -> Vec<Process> {
        vec![make_process(1, 0, 5, 1), make_process(2, 1, 3, 2)]
    }

    #[test]
    fn test_run_schedule_fcfs_example() {
        let result = run_schedule(Algorithm::Fcfs, &two_processes(), None).unwrap();
        let (schedule, stats) = result.into_parts();
        assert_eq!(
            schedule.entries(),
            &[
                crate::models::ScheduleEntry::new(1, 0, 5),
                crate::models::ScheduleEntry::new(2, 5, 8)
            ]
        );
        assert!((stats.avg_waiting_time - 2.0).abs() < 1e-10);
        assert!((stats.avg_turnaround_time - 6.0).abs() < 1e-10);
        assert!((stats.avg_response_time - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_run_schedule_rr_requires_quantum() {
        let err = run_schedule(Algorithm::RoundRobin, &two_processes(), None).unwrap_err();
        assert!(matches!(err, SimulationError::MissingQuantum));
    }

    #[test]
    fn test_run_schedule_rejects_bad_quantum() {
        for q in [0, -3, i64::from(u32::MAX) + 1] {
            let err = run_schedule(Algorithm::RoundRobin, &two_processes(), Some(q)).unwrap_err();
            assert!(matches!(err, SimulationError::InvalidQuantum(v) if v == q));
        }
    }

    #[test]
    fn test_run_schedule_ignores_quantum_for_nonpreemptive() {
        assert!(run_schedule(Algorithm::Sjf, &two_processes(), Some(0)).is_ok());
    }

    #[test]
    fn test_run_schedule_rejects_invalid_processes() {
        let procs = vec![make_process(1, 0, 0, 1), make_process(1, -1, 2, 1)];
        let err = run_schedule(Algorithm::Fcfs, &procs, None).unwrap_err();
        match err {
            SimulationError::InvalidProcess(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_schedule_rejects_overflowing_timeline() {
        let procs = vec![Process::new(1).with_arrival(i64::MAX - 1).with_burst(5)];
        for algorithm in Algorithm::ALL {
            match run_schedule(algorithm, &procs, Some(2)).unwrap_err() {
                SimulationError::InvalidProcess(errors) => {
                    assert_eq!(errors[0].kind, crate::validation::ValidationErrorKind::TimeOverflow)
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_run_schedule_at_horizon_limit() {
        use crate::validation::MAX_HORIZON;
        let procs = vec![
            Process::new(1).with_burst(MAX_HORIZON / 2),
            Process::new(2).with_burst(MAX_HORIZON / 2),
        ];
        for algorithm in [Algorithm::Fcfs, Algorithm::Sjf, Algorithm::Priority] {
            let result = run_schedule(algorithm, &procs, None).unwrap();
            assert_eq!(result.schedule.makespan(), 2 * (MAX_HORIZON / 2));
        }
    }

    #[test]
    fn test_error_messages_name_constraint() {
        let err = run_schedule(Algorithm::Fcfs, &[make_process(1, 0, 0, 1)], None).unwrap_err();
        assert!(err.to_string().contains("burst time must be positive"));
        assert_eq!(
            SimulationError::InvalidQuantum(0).to_string(),
            "Time quantum must be a positive integer (got 0)"
        );
    }

    #[test]
    fn test_every_algorithm_handles_empty_input() {
        for algorithm in Algorithm::ALL {
            let result = run_schedule(algorithm, &[], Some(2)).unwrap();
            assert!(result.schedule.is_empty());
            assert!(result.metrics.is_empty());
            assert_eq!(result.stats, ScheduleStats::default());
        }
    }

    #[test]
    fn test_metrics_for() {
        let result = run_schedule(Algorithm::Fcfs, &two_processes(), None).unwrap();
        assert_eq!(result.metrics_for(2).unwrap().waiting, 4);
        assert!(result.metrics_for(3).is_none());
    }

    #[test]
    fn test_parse_quantum() {
        assert_eq!(parse_quantum(3).unwrap().get(), 3);
        assert!(parse_quantum(0).is_err());
    }
}
