//! Schedule (solution) model.
//!
//! A schedule is the CPU timeline produced by a scheduling algorithm:
//! an ordered list of contiguous execution intervals on a single CPU.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

use super::Pid;

/// One contiguous CPU interval granted to a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Process that ran.
    pub pid: Pid,
    /// Start tick (inclusive).
    pub start: i64,
    /// End tick (exclusive, always > start).
    pub end: i64,
}

impl ScheduleEntry {
    /// Creates a new entry.
    pub fn new(pid: Pid, start: i64, end: i64) -> Self {
        Self { pid, start, end }
    }

    /// Length of the interval in ticks.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// A complete CPU timeline in execution order.
///
/// Entries are sorted by `start`. Under non-preemptive disciplines each
/// pid appears exactly once; under Round-Robin a pid may appear once per
/// quantum it received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interval.
    pub fn push(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Entries in execution order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Consumes the schedule, returning its entries.
    pub fn into_entries(self) -> Vec<ScheduleEntry> {
        self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Makespan: latest end time across all entries.
    pub fn makespan(&self) -> i64 {
        self.entries.iter().map(|e| e.end).max().unwrap_or(0)
    }

    /// Returns all entries for a given process.
    pub fn entries_for(&self, pid: Pid) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.pid == pid).collect()
    }

    /// First dispatch time of a process.
    pub fn first_start(&self, pid: Pid) -> Option<i64> {
        self.entries
            .iter()
            .filter(|e| e.pid == pid)
            .map(|e| e.start)
            .min()
    }

    /// Completion time of a process (latest end of its entries).
    pub fn completion_time(&self, pid: Pid) -> Option<i64> {
        self.entries
            .iter()
            .filter(|e| e.pid == pid)
            .map(|e| e.end)
            .max()
    }

    /// Total CPU time handed to a process.
    pub fn cpu_time(&self, pid: Pid) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.pid == pid)
            .map(ScheduleEntry::duration)
            .sum()
    }

    /// Total busy CPU time.
    pub fn busy_time(&self) -> i64 {
        self.entries.iter().map(ScheduleEntry::duration).sum()
    }

    /// Idle CPU time between t=0 and the makespan.
    pub fn idle_time(&self) -> i64 {
        self.makespan() - self.busy_time()
    }

    /// CPU utilization over `[0, makespan)`.
    ///
    /// Returns `None` for an empty schedule.
    pub fn utilization(&self) -> Option<f64> {
        let horizon = self.makespan();
        if horizon <= 0 {
            return None;
        }
        Some(self.busy_time() as f64 / horizon as f64)
    }

    /// Number of times the CPU switched from one process to another.
    ///
    /// Consecutive entries of the same pid (e.g. a lone process receiving
    /// several quanta) do not count.
    pub fn context_switches(&self) -> usize {
        self.entries
            .windows(2)
            .filter(|w| w[0].pid != w[1].pid)
            .count()
    }

    /// Whether no two entries overlap and entries are in start order.
    pub fn is_sequential(&self) -> bool {
        self.entries.windows(2).all(|w| w[1].start >= w[0].end)
    }
}

impl From<Vec<ScheduleEntry>> for Schedule {
    fn from(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> Schedule {
        Schedule::from(vec![
            ScheduleEntry::new(1, 0, 2),
            ScheduleEntry::new(2, 2, 4),
            ScheduleEntry::new(1, 4, 5),
            ScheduleEntry::new(3, 7, 9),
        ])
    }

    #[test]
    fn test_schedule_makespan() {
        assert_eq!(sample_schedule().makespan(), 9);
    }

    #[test]
    fn test_entries_for() {
        let s = sample_schedule();
        assert_eq!(s.entries_for(1).len(), 2);
        assert_eq!(s.entries_for(3).len(), 1);
        assert!(s.entries_for(99).is_empty());
    }

    #[test]
    fn test_first_start_and_completion() {
        let s = sample_schedule();
        assert_eq!(s.first_start(1), Some(0));
        assert_eq!(s.completion_time(1), Some(5));
        assert_eq!(s.completion_time(99), None);
        assert_eq!(s.cpu_time(1), 3);
    }

    #[test]
    fn test_busy_idle_utilization() {
        let s = sample_schedule();
        assert_eq!(s.busy_time(), 7);
        assert_eq!(s.idle_time(), 2);
        assert!((s.utilization().unwrap() - 7.0 / 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_context_switches() {
        let s = sample_schedule();
        assert_eq!(s.context_switches(), 3);

        let lone = Schedule::from(vec![ScheduleEntry::new(1, 0, 2), ScheduleEntry::new(1, 2, 4)]);
        assert_eq!(lone.context_switches(), 0);
    }

    #[test]
    fn test_is_sequential() {
        assert!(sample_schedule().is_sequential());
        let overlapping =
            Schedule::from(vec![ScheduleEntry::new(1, 0, 3), ScheduleEntry::new(2, 2, 4)]);
        assert!(!overlapping.is_sequential());
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::new();
        assert_eq!(s.makespan(), 0);
        assert!(s.is_empty());
        assert!(s.utilization().is_none());
        assert_eq!(s.context_switches(), 0);
    }

    #[test]
    fn test_schedule_serializes_as_entry_list() {
        let s = Schedule::from(vec![ScheduleEntry::new(1, 0, 5)]);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"[{"pid":1,"start":0,"end":5}]"#);
    }
}
