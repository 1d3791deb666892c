//! First-Come-First-Served.
//!
//! # Algorithm
//!
//! 1. Stable-sort processes by arrival (ties keep input order).
//! 2. Run each to completion at `max(clock, arrival)`.
//!
//! # Complexity
//! O(n log n) for the sort.

use log::trace;

use super::{ProcessMetrics, SimulationResult};
use crate::models::{Process, Schedule, ScheduleEntry};

/// Schedules processes in arrival order.
///
/// # Example
///
/// ```
/// use u_procsched::models::Process;
/// use u_procsched::scheduler::fcfs;
///
/// let procs = vec![
///     Process::new(1).with_arrival(0).with_burst(5),
///     Process::new(2).with_arrival(1).with_burst(3),
/// ];
/// let result = fcfs(&procs);
/// assert_eq!(result.schedule.makespan(), 8);
/// assert!((result.stats.avg_waiting_time - 2.0).abs() < 1e-10);
/// ```
pub fn fcfs(processes: &[Process]) -> SimulationResult {
    let mut order: Vec<usize> = (0..processes.len()).collect();
    order.sort_by_key(|&i| processes[i].arrival);

    let mut schedule = Schedule::new();
    let mut metrics: Vec<Option<ProcessMetrics>> = vec![None; processes.len()];
    let mut clock = 0;

    for i in order {
        let p = &processes[i];
        let start = clock.max(p.arrival);
        let end = start + p.burst;
        trace!("fcfs: P{} runs [{start}, {end})", p.pid);

        schedule.push(ScheduleEntry::new(p.pid, start, end));
        metrics[i] = Some(ProcessMetrics::new(p, start, end));
        clock = end;
    }

    SimulationResult::new(schedule, metrics.into_iter().flatten().collect())
}
