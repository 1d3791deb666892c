//! Process descriptor and process table.
//!
//! A process is the unit of work handed to the CPU schedulers. Descriptors
//! are immutable once created; schedulers copy them and keep any mutable
//! bookkeeping (remaining burst, first dispatch) on the side.
//!
//! # Time Representation
//! All times are integer ticks of a simulated clock starting at t=0.

use serde::{Deserialize, Serialize};

use crate::validation::{validate_process, ValidationError};

/// Process identifier. Valid identifiers start at 1.
pub type Pid = u32;

/// A process to be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier (≥ 1).
    pub pid: Pid,
    /// Tick at which the process becomes schedulable (≥ 0).
    pub arrival: i64,
    /// Total CPU time required (≥ 1).
    pub burst: i64,
    /// Scheduling priority (≥ 1, lower value = more important).
    pub priority: i32,
}

impl Process {
    /// Creates a process arriving at t=0 with burst 1 and priority 1.
    pub fn new(pid: Pid) -> Self {
        Self {
            pid,
            arrival: 0,
            burst: 1,
            priority: 1,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival: i64) -> Self {
        self.arrival = arrival;
        self
    }

    /// Sets the burst time.
    pub fn with_burst(mut self, burst: i64) -> Self {
        self.burst = burst;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Node label used in resource-allocation graphs and Gantt charts.
    pub fn label(&self) -> String {
        format!("P{}", self.pid)
    }
}

/// Ordered list of processes entered by a user.
///
/// Identifiers are assigned in creation order (`len + 1`), so the table
/// never contains duplicate pids as long as it is only grown through
/// [`ProcessTable::add`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessTable {
    processes: Vec<Process>,
}

impl ProcessTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends a new process, returning its assigned pid.
    pub fn add(
        &mut self,
        arrival: i64,
        burst: i64,
        priority: i32,
    ) -> Result<Pid, Vec<ValidationError>> {
        let pid = self.next_pid();
        let process = Process::new(pid)
            .with_arrival(arrival)
            .with_burst(burst)
            .with_priority(priority);
        validate_process(&process)?;
        self.processes.push(process);
        Ok(pid)
    }

    /// Pid the next [`add`](Self::add) will assign.
    pub fn next_pid(&self) -> Pid {
        self.processes.len() as Pid + 1
    }

    /// Looks up a process by pid.
    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Processes in creation order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Removes every process. Pids restart at 1.
    pub fn reset(&mut self) {
        self.processes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_process_builder() {
        let p = Process::new(3)
            .with_arrival(4)
            .with_burst(7)
            .with_priority(2);
        assert_eq!(p.pid, 3);
        assert_eq!(p.arrival, 4);
        assert_eq!(p.burst, 7);
        assert_eq!(p.priority, 2);
        assert_eq!(p.label(), "P3");
    }

    #[test]
    fn test_table_assigns_sequential_pids() {
        let mut table = ProcessTable::new();
        assert_eq!(table.add(0, 5, 1).unwrap(), 1);
        assert_eq!(table.add(1, 3, 2).unwrap(), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(2).unwrap().burst, 3);
        assert!(table.get(9).is_none());
    }

    #[test]
    fn test_table_rejects_invalid_process() {
        let mut table = ProcessTable::new();
        let errors = table.add(-1, 0, 0).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveBurst));
        // Rejected processes do not consume a pid.
        assert!(table.is_empty());
        assert_eq!(table.next_pid(), 1);
    }

    #[test]
    fn test_table_reset() {
        let mut table = ProcessTable::new();
        table.add(0, 1, 1).unwrap();
        table.reset();
        assert!(table.is_empty());
        assert_eq!(table.add(0, 1, 1).unwrap(), 1);
    }
}
