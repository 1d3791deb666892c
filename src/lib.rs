//! CPU scheduling simulation and deadlock detection.
//!
//! Two independent engines for exploring operating-system concepts:
//!
//! - a **scheduling simulator** that turns a process list into a CPU
//!   timeline and per-process timing statistics under FCFS, SJF,
//!   Round-Robin and Priority scheduling, plus a heuristic that suggests
//!   which of them suits a workload;
//! - a **resource-allocation graph** that records which processes hold and
//!   wait for which resources and reports every cycle (deadlock).
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessTable`, `Schedule`,
//!   `ScheduleEntry`, `WorkloadGenerator`
//! - **`dispatching`**: Priority rules (`Fifo`, `Spt`, `PriorityRule`, `Hrrn`)
//!   and the `RuleEngine` that composes them
//! - **`scheduler`**: The four simulators, `ScheduleStats`, `suggest_algorithm`
//!   and the validated `run_schedule` entry point
//! - **`rag`**: `ResourceAllocationGraph` and `DeadlockReport`
//! - **`session`**: A process table and graph owned together
//! - **`config`**: `SimulationConfig`
//! - **`validation`**: Input integrity checks on process descriptors
//!
//! # Example
//!
//! ```
//! use u_procsched::models::Process;
//! use u_procsched::scheduler::{run_schedule, Algorithm};
//!
//! let procs = vec![
//!     Process::new(1).with_burst(5),
//!     Process::new(2).with_arrival(1).with_burst(3).with_priority(2),
//! ];
//! let result = run_schedule(Algorithm::Fcfs, &procs, None).unwrap();
//! assert_eq!(result.schedule.makespan(), 8);
//! assert!((result.stats.avg_waiting_time - 2.0).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts"
//! - Holt (1972), "Some Deadlock Properties of Computer Systems"
//! - Johnson (1975), "Finding All the Elementary Circuits of a Directed Graph"

pub mod config;
pub mod dispatching;
pub mod models;
pub mod rag;
pub mod scheduler;
pub mod session;
pub mod validation;

pub use config::SimulationConfig;
pub use models::{Pid, Process, ProcessTable, Schedule, ScheduleEntry};
pub use rag::{DeadlockReport, RagError, ResourceAllocationGraph};
pub use scheduler::{
    run_schedule, suggest_algorithm, Algorithm, ScheduleStats, SimulationError, SimulationResult,
};
pub use session::Session;
