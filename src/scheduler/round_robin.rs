//! Round-Robin.
//!
//! # Algorithm
//!
//! 1. Admit arrived processes to a FIFO ready queue in input order.
//! 2. Dispatch the head for `min(remaining, quantum)` ticks.
//! 3. Every process still waiting in the queue accrues the slice length
//!    as waiting time.
//! 4. Admit everything that arrived up to the end of the slice.
//! 5. Re-enqueue the preempted process at the tail (after the arrivals
//!    from step 4) if it still has work left.
//! 6. If the queue is empty, jump the clock to the next arrival.
//!
//! Waiting time is finalised on completion as
//! `accrued + end − arrival − burst`. Time spent queued is therefore
//! counted by both terms, so RR waiting is not `turnaround − burst`.

use std::collections::VecDeque;
use std::num::NonZeroU32;

use log::{debug, trace};

use super::{ProcessMetrics, SimulationResult};
use crate::models::{Process, Schedule, ScheduleEntry};

/// Round-Robin bookkeeping for one simulation.
struct RoundRobinState<'a> {
    processes: &'a [Process],
    remaining: Vec<i64>,
    admitted: Vec<bool>,
    first_start: Vec<Option<i64>>,
    accrued: Vec<i64>,
    queue: VecDeque<usize>,
}

impl<'a> RoundRobinState<'a> {
    fn new(processes: &'a [Process]) -> Self {
        let n = processes.len();
        Self {
            processes,
            remaining: processes.iter().map(|p| p.burst).collect(),
            admitted: vec![false; n],
            first_start: vec![None; n],
            accrued: vec![0; n],
            queue: VecDeque::with_capacity(n),
        }
    }

    /// Enqueues every not-yet-admitted process with `arrival <= clock`.
    fn admit(&mut self, clock: i64) {
        for (i, p) in self.processes.iter().enumerate() {
            if !self.admitted[i] && p.arrival <= clock {
                self.admitted[i] = true;
                self.queue.push_back(i);
            }
        }
    }

    /// Charges `slice` ticks of waiting to every queued process.
    fn accrue(&mut self, slice: i64) {
        for &i in &self.queue {
            self.accrued[i] += slice;
        }
    }

    /// Earliest arrival among processes not yet admitted.
    fn next_arrival(&self) -> Option<i64> {
        self.processes
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.admitted[*i])
            .map(|(_, p)| p.arrival)
            .min()
    }
}

/// Schedules processes Round-Robin with the given quantum.
///
/// A pid appears once per slice it received, so consecutive slices of a
/// lone process show up as separate entries.
///
/// # Example
///
/// ```
/// use std::num::NonZeroU32;
/// use u_procsched::models::Process;
/// use u_procsched::scheduler::round_robin;
///
/// let procs = vec![
///     Process::new(1).with_burst(3),
///     Process::new(2).with_burst(2),
/// ];
/// let quantum = NonZeroU32::new(2).unwrap();
/// let result = round_robin(&procs, quantum);
/// assert_eq!(result.schedule.len(), 3);
/// assert_eq!(result.schedule.cpu_time(1), 3);
/// ```
pub fn round_robin(processes: &[Process], quantum: NonZeroU32) -> SimulationResult {
    let quantum = i64::from(quantum.get());
    let mut state = RoundRobinState::new(processes);
    let mut schedule = Schedule::new();
    let mut metrics: Vec<Option<ProcessMetrics>> = vec![None; processes.len()];
    let mut clock = 0;

    loop {
        state.admit(clock);

        let Some(i) = state.queue.pop_front() else {
            match state.next_arrival() {
                Some(arrival) => {
                    debug!("rr: cpu idle at {clock}, jumping to next arrival {arrival}");
                    clock = arrival;
                    continue;
                }
                None => break,
            }
        };

        let p = &processes[i];
        let start = clock;
        let first_start = *state.first_start[i].get_or_insert(start);
        let slice = state.remaining[i].min(quantum);
        clock += slice;
        state.remaining[i] -= slice;
        schedule.push(ScheduleEntry::new(p.pid, start, clock));
        trace!(
            "rr: P{} ran [{start}, {clock}), {} left",
            p.pid,
            state.remaining[i]
        );

        state.accrue(slice);

        // Arrivals during the slice queue up ahead of the preempted process.
        state.admit(clock);

        if state.remaining[i] > 0 {
            state.queue.push_back(i);
        } else {
            let waiting = state.accrued[i] + (clock - p.arrival - p.burst);
            metrics[i] = Some(ProcessMetrics::new(p, first_start, clock).with_waiting(waiting));
        }
    }

    SimulationResult::new(schedule, metrics.into_iter().flatten().collect())
}
