//! Non-preemptive rule-driven dispatcher (SJF, Priority).
//!
//! # Algorithm
//!
//! 1. Order candidates by arrival, breaking arrival ties with the rule
//!    engine (stable, so full ties keep input order).
//! 2. At each decision point move every arrived candidate into the ready
//!    set, keeping candidate order.
//! 3. Dispatch the ready process the rule engine ranks first and run it to
//!    completion.
//! 4. If nothing is ready, jump the clock to the next arrival.
//!
//! Jumping is observably identical to advancing one tick at a time: no
//! decision can change until the next arrival.
//!
//! # Complexity
//! O(n²·r) where r = number of rules.

use std::collections::VecDeque;

use log::{debug, trace};

use super::{ProcessMetrics, SimulationResult};
use crate::dispatching::{rules, RuleEngine, SchedulingContext};
use crate::models::{Process, Schedule, ScheduleEntry};

/// Non-preemptive scheduler driven by a dispatching rule engine.
///
/// # Example
///
/// ```
/// use u_procsched::dispatching::{rules, RuleEngine};
/// use u_procsched::models::Process;
/// use u_procsched::scheduler::DispatchScheduler;
///
/// let procs = vec![
///     Process::new(1).with_arrival(0).with_burst(10),
///     Process::new(2).with_arrival(1).with_burst(4),
///     Process::new(3).with_arrival(2).with_burst(1),
/// ];
/// let hrrn = DispatchScheduler::new(RuleEngine::new().with_rule(rules::Hrrn));
/// let result = hrrn.schedule(&procs);
/// assert_eq!(result.schedule.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DispatchScheduler {
    rule_engine: RuleEngine,
}

impl DispatchScheduler {
    /// Creates a dispatcher with the given rule engine.
    pub fn new(rule_engine: RuleEngine) -> Self {
        Self { rule_engine }
    }

    /// Shortest-Job-First dispatcher.
    pub fn shortest_job_first() -> Self {
        Self::new(RuleEngine::new().with_rule(rules::Spt))
    }

    /// Priority dispatcher (lowest priority value first).
    pub fn priority() -> Self {
        Self::new(RuleEngine::new().with_rule(rules::PriorityRule))
    }

    /// Runs the dispatch loop over `processes`.
    pub fn schedule(&self, processes: &[Process]) -> SimulationResult {
        let mut pending: VecDeque<usize> = self.candidate_order(processes).into();
        let mut ready: Vec<usize> = Vec::new();
        let mut schedule = Schedule::new();
        let mut metrics: Vec<Option<ProcessMetrics>> = vec![None; processes.len()];
        let mut clock = 0;

        loop {
            while let Some(&i) = pending.front() {
                if processes[i].arrival > clock {
                    break;
                }
                ready.push(i);
                pending.pop_front();
            }

            if ready.is_empty() {
                match pending.front() {
                    Some(&next) => {
                        debug!(
                            "cpu idle at {clock}, jumping to next arrival {}",
                            processes[next].arrival
                        );
                        clock = processes[next].arrival;
                        continue;
                    }
                    None => break,
                }
            }

            let context = SchedulingContext::at_time(clock);
            let view: Vec<Process> = ready.iter().map(|&i| processes[i]).collect();
            let Some(pick) = self.rule_engine.select_best(&view, &context) else {
                break;
            };
            let i = ready.remove(pick);
            let p = &processes[i];

            let start = clock.max(p.arrival);
            let end = start + p.burst;
            trace!(
                "{:?}: dispatch P{} at {start} (scores={:?}, ready={})",
                self.rule_engine.rule_names(),
                p.pid,
                self.rule_engine.evaluate(p, &context),
                view.len()
            );

            schedule.push(ScheduleEntry::new(p.pid, start, end));
            metrics[i] = Some(ProcessMetrics::new(p, start, end));
            clock = end;
        }

        SimulationResult::new(schedule, metrics.into_iter().flatten().collect())
    }

    /// Rule order at t=0, then a stable re-sort by arrival: the result is
    /// ordered by `(arrival, rules, input position)`.
    fn candidate_order(&self, processes: &[Process]) -> Vec<usize> {
        let origin = SchedulingContext::at_time(0);
        let mut order = self.rule_engine.sort_indices(processes, &origin);
        order.sort_by_key(|&i| processes[i].arrival);
        order
    }
}

/// Shortest-Job-First, non-preemptive.
///
/// Among arrived processes the shortest burst runs next; ties go to the
/// earliest arrival, then input order.
pub fn sjf(processes: &[Process]) -> SimulationResult {
    DispatchScheduler::shortest_job_first().schedule(processes)
}

/// Priority scheduling, non-preemptive.
///
/// Among arrived processes the lowest priority value runs next; ties go to
/// the earliest arrival, then input order.
pub fn priority(processes: &[Process]) -> SimulationResult {
    DispatchScheduler::priority().schedule(processes)
}
