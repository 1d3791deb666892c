//! Algorithm-selection heuristic.

use std::collections::HashSet;

use log::debug;

use super::Algorithm;
use crate::models::Process;

/// Suggests a scheduling algorithm for a process list.
///
/// Advisory only; callers may run any algorithm regardless.
///
/// 1. Empty input → FCFS.
/// 2. Arrivals within one tick of each other and identical bursts → FCFS.
/// 3. Bursts vary and are all distinct → SJF.
/// 4. Some priority value repeats → Priority.
/// 5. Otherwise → Round-Robin.
pub fn suggest_algorithm(processes: &[Process]) -> Algorithm {
    let suggestion = pick(processes);
    debug!(
        "suggested {} for {} processes",
        suggestion.tag(),
        processes.len()
    );
    suggestion
}

fn pick(processes: &[Process]) -> Algorithm {
    let (Some(arrival_range), Some(burst_range)) = (
        spread(processes.iter().map(|p| p.arrival)),
        spread(processes.iter().map(|p| p.burst)),
    ) else {
        return Algorithm::Fcfs;
    };

    if arrival_range <= 1 && burst_range == 0 {
        return Algorithm::Fcfs;
    }

    let distinct_bursts: HashSet<i64> = processes.iter().map(|p| p.burst).collect();
    if burst_range > 0 && distinct_bursts.len() == processes.len() {
        return Algorithm::Sjf;
    }

    let distinct_priorities: HashSet<i32> = processes.iter().map(|p| p.priority).collect();
    if distinct_priorities.len() < processes.len() {
        return Algorithm::Priority;
    }

    Algorithm::RoundRobin
}

/// `max - min`, or `None` for an empty iterator.
fn spread(values: impl Iterator<Item = i64> + Clone) -> Option<i64> {
    let max = values.clone().max()?;
    let min = values.min()?;
    Some(max - min)
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
    fn test_empty_is_fcfs() {
        assert_eq!(suggest_algorithm(&[]), Algorithm::Fcfs);
    }

    #[test]
    fn test_identical_processes_is_fcfs() {
        let procs = vec![make_process(1, 0, 4, 1), make_process(2, 1, 4, 1)];
        assert_eq!(suggest_algorithm(&procs), Algorithm::Fcfs);
    }

    #[test]
    fn test_single_process_is_fcfs() {
        assert_eq!(
            suggest_algorithm(&[make_process(1, 7, 3, 2)]),
            Algorithm::Fcfs
        );
    }

    #[test]
    fn test_distinct_bursts_is_sjf() {
        let procs = vec![
            make_process(1, 0, 5, 1),
            make_process(2, 1, 3, 1),
            make_process(3, 2, 8, 1),
        ];
        assert_eq!(suggest_algorithm(&procs), Algorithm::Sjf);
    }

    #[test]
    fn test_repeated_priority_is_priority() {
        let procs = vec![
            make_process(1, 0, 5, 2),
            make_process(2, 1, 5, 2),
            make_process(3, 2, 3, 1),
        ];
        assert_eq!(suggest_algorithm(&procs), Algorithm::Priority);
    }

    #[test]
    fn test_spread_arrivals_same_burst_distinct_priority_is_rr() {
        let procs = vec![
            make_process(1, 0, 4, 1),
            make_process(2, 5, 4, 2),
            make_process(3, 9, 4, 3),
        ];
        assert_eq!(suggest_algorithm(&procs), Algorithm::RoundRobin);
    }

    #[test]
    fn test_repeated_burst_with_unique_priorities_is_rr() {
        let procs = vec![
            make_process(1, 0, 4, 1),
            make_process(2, 0, 4, 2),
            make_process(3, 0, 6, 3),
        ];
        assert_eq!(suggest_algorithm(&procs), Algorithm::RoundRobin);
    }
}
