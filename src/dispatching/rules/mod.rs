//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Arrival-based**: FIFO
//! - **Time-based**: SPT (SJF), HRRN
//! - **Priority**: PRIORITY
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Brinch Hansen (1971), "Short-Term Scheduling in Multiprogramming Systems"

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::Process;

// ======================== Arrival-based rules ========================

/// First In First Out.
///
/// Prioritizes processes by arrival time. A non-preemptive dispatcher
/// driven by this rule reproduces FCFS.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        process.arrival as f64
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}

// ======================== Time-based rules ========================

/// Shortest Processing Time.
///
/// Prioritizes processes with shorter bursts. This is the SJF rule;
/// optimal for mean waiting time when all processes are ready together.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        process.burst as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Highest Response Ratio Next.
///
/// Response ratio = (waiting + burst) / burst. Favours short jobs like SPT
/// but ages long-waiting processes so they cannot starve.
#[derive(Debug, Clone, Copy)]
pub struct Hrrn;

impl DispatchingRule for Hrrn {
    fn name(&self) -> &'static str {
        "HRRN"
    }

    fn evaluate(&self, process: &Process, context: &SchedulingContext) -> RuleScore {
        if process.burst <= 0 {
            return f64::MAX;
        }
        let waited = context.waited(process.arrival) as f64;
        let burst = process.burst as f64;
        -((waited + burst) / burst) // Higher ratio = higher priority → negate
    }

    fn description(&self) -> &'static str {
        "Highest Response Ratio Next"
    }
}

// ======================== Priority-based rule ========================

/// Process priority rule.
///
/// Lower priority values run first (1 = highest), so the value itself is
/// the score.
#[derive(Debug, Clone, Copy)]
pub struct PriorityRule;

impl DispatchingRule for PriorityRule {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        process.priority as f64
    }

    fn description(&self) -> &'static str {
        "Process Priority"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_process(pid: u32, arrival: i64, burst: i64, priority: i32) -> Process {
        Process::new(pid)
            .with_arrival(arrival)
            .with_burst(burst)
            .with_priority(priority)
    }

    #[test]
    fn test_fifo() {
        let ctx = SchedulingContext::at_time(10);
        let first = make_process(1, 1, 9, 1);
        let second = make_process(2, 3, 1, 1);
        assert!(Fifo.evaluate(&first, &ctx) < Fifo.evaluate(&second, &ctx));
    }

    #[test]
    fn test_spt() {
        let ctx = SchedulingContext::at_time(0);
        let short = make_process(1, 0, 2, 1);
        let long = make_process(2, 0, 8, 1);
        assert!(Spt.evaluate(&short, &ctx) < Spt.evaluate(&long, &ctx));
    }

    #[test]
    fn test_hrrn_ages_long_waiters() {
        let ctx = SchedulingContext::at_time(20);
        // Waited 20, burst 10 → ratio 3.0
        let old_long = make_process(1, 0, 10, 1);
        // Waited 0, burst 2 → ratio 1.0
        let new_short = make_process(2, 20, 2, 1);
        assert!(Hrrn.evaluate(&old_long, &ctx) < Hrrn.evaluate(&new_short, &ctx));
    }

    #[test]
    fn test_hrrn_without_waiting_is_tied() {
        let ctx = SchedulingContext::at_time(0);
        let a = make_process(1, 0, 3, 1);
        let b = make_process(2, 0, 9, 1);
        assert!((Hrrn.evaluate(&a, &ctx) - Hrrn.evaluate(&b, &ctx)).abs() < 1e-10);
    }

    #[test]
    fn test_priority() {
        let ctx = SchedulingContext::at_time(0);
        let high = make_process(1, 0, 1, 1);
        let low = make_process(2, 0, 1, 5);
        assert!(PriorityRule.evaluate(&high, &ctx) < PriorityRule.evaluate(&low, &ctx));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(Spt.description(), "Shortest Processing Time");
        assert_eq!(PriorityRule.name(), "PRIORITY");
    }
}
