//! Simulation session.
//!
//! A [`Session`] owns the process table, the resource-allocation graph and
//! the settings a user works with interactively. Everything is held by
//! value; callers create as many independent sessions as they need.

use log::{debug, info};

use crate::config::SimulationConfig;
use crate::models::{Pid, ProcessTable};
use crate::rag::{DeadlockReport, ResourceAllocationGraph};
use crate::scheduler::{run_schedule, suggest_algorithm, Algorithm, SimulationError, SimulationResult};

/// Process table, resource graph and settings for one user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    table: ProcessTable,
    rag: ResourceAllocationGraph,
    config: SimulationConfig,
}

impl Session {
    /// Creates an empty session with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the settings.
    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a process and registers it as a graph node.
    pub fn add_process(
        &mut self,
        arrival: i64,
        burst: i64,
        priority: i32,
    ) -> Result<Pid, SimulationError> {
        let pid = self
            .table
            .add(arrival, burst, priority)
            .map_err(SimulationError::InvalidProcess)?;
        self.rag.add_process(pid);
        debug!("session: added P{pid} (arrival {arrival}, burst {burst}, priority {priority})");
        Ok(pid)
    }

    /// Runs the configured algorithm, or the suggested one if none is set.
    ///
    /// Returns the algorithm that ran alongside its result.
    pub fn simulate(&self) -> Result<(Algorithm, SimulationResult), SimulationError> {
        let algorithm = self
            .config
            .algorithm
            .unwrap_or_else(|| suggest_algorithm(self.table.processes()));
        let result = self.run(algorithm)?;
        Ok((algorithm, result))
    }

    /// Runs `algorithm` over the current processes with the configured quantum.
    pub fn run(&self, algorithm: Algorithm) -> Result<SimulationResult, SimulationError> {
        if algorithm.needs_quantum() {
            self.config.validate()?;
        }
        info!(
            "session: simulating {} over {} processes",
            algorithm.display_name(),
            self.table.len()
        );
        run_schedule(algorithm, self.table.processes(), Some(self.config.quantum))
    }

    /// Runs deadlock detection on the session's graph.
    pub fn detect_deadlock(&self) -> DeadlockReport {
        self.rag.detect_deadlock()
    }

    /// Clears the process table. The graph keeps its nodes.
    pub fn reset_processes(&mut self) {
        self.table.reset();
    }

    /// Clears the resource-allocation graph.
    pub fn reset_rag(&mut self) {
        self.rag.clear();
    }

    /// Clears the process table and the graph.
    pub fn reset_all(&mut self) {
        self.reset_processes();
        self.reset_rag();
    }

    /// The process table.
    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    /// The resource-allocation graph.
    pub fn rag(&self) -> &ResourceAllocationGraph {
        &self.rag
    }

    /// Mutable access to the graph for declaring resources and edges.
    pub fn rag_mut(&mut self) -> &mut ResourceAllocationGraph {
        &mut self.rag
    }

    /// Current settings.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worked_example() -> Session {
        let mut session = Session::new();
        session.add_process(0, 5, 1).unwrap();
        session.add_process(1, 3, 2).unwrap();
        session
    }

    #[test]
    fn test_add_process_registers_node() {
        let session = worked_example();
        assert_eq!(session.table().len(), 2);
        assert_eq!(session.rag().processes().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_add_invalid_process() {
        let mut session = Session::new();
        let err = session.add_process(0, 0, 1).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidProcess(_)));
        assert!(session.rag().is_empty());
    }

    #[test]
    fn test_simulate_uses_suggestion() {
        // Distinct bursts → SJF.
        let (algorithm, result) = worked_example().simulate().unwrap();
        assert_eq!(algorithm, Algorithm::Sjf);
        assert_eq!(result.schedule.makespan(), 8);
    }

    #[test]
    fn test_simulate_uses_configured_algorithm() {
        let session = worked_example()
            .with_config(SimulationConfig::new().with_algorithm(Algorithm::Fcfs));
        let (algorithm, result) = session.simulate().unwrap();
        assert_eq!(algorithm, Algorithm::Fcfs);
        assert!((result.stats.avg_waiting_time - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_run_round_robin_with_configured_quantum() {
        let session = worked_example().with_config(SimulationConfig::new().with_quantum(3));
        let result = session.run(Algorithm::RoundRobin).unwrap();
        assert_eq!(result.schedule.entries()[0].end, 3);
    }

    #[test]
    fn test_run_round_robin_rejects_bad_quantum() {
        let session = worked_example().with_config(SimulationConfig::new().with_quantum(0));
        assert!(matches!(
            session.run(Algorithm::RoundRobin),
            Err(SimulationError::InvalidQuantum(0))
        ));
        // The quantum is irrelevant for non-preemptive algorithms.
        assert!(session.run(Algorithm::Priority).is_ok());
    }

    #[test]
    fn test_empty_session_simulates() {
        let (algorithm, result) = Session::new().simulate().unwrap();
        assert_eq!(algorithm, Algorithm::Fcfs);
        assert!(result.schedule.is_empty());
    }

    #[test]
    fn test_deadlock_through_session() {
        let mut session = worked_example();
        let rag = session.rag_mut();
        rag.add_resource("1", 1).unwrap();
        rag.add_resource("2", 1).unwrap();
        rag.allocate(1, "1", 1);
        rag.allocate(2, "2", 1);
        rag.request(1, "2", 1);
        rag.request(2, "1", 1);
        assert!(session.detect_deadlock().has_deadlock);
    }

    #[test]
    fn test_resets() {
        let mut session = worked_example();
        session.rag_mut().add_resource("1", 1).unwrap();

        session.reset_processes();
        assert!(session.table().is_empty());
        assert_eq!(session.rag().processes().count(), 2);

        session.reset_rag();
        assert!(session.rag().is_empty());

        let mut session = worked_example();
        session.reset_all();
        assert!(session.table().is_empty());
        assert!(session.rag().is_empty());
    }
}
