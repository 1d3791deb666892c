//! Simulation settings.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::scheduler::{parse_quantum, Algorithm, SimulationError};

/// Default Round-Robin time quantum.
pub const DEFAULT_QUANTUM: i64 = 2;

/// Settings for a simulation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Round-Robin time quantum, as entered. Validated by [`SimulationConfig::validate`].
    #[serde(default = "default_quantum")]
    pub quantum: i64,
    /// Algorithm to run. `None` runs the suggested one.
    #[serde(default)]
    pub algorithm: Option<Algorithm>,
}

fn default_quantum() -> i64 {
    DEFAULT_QUANTUM
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            algorithm: None,
        }
    }
}

impl SimulationConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Round-Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }

    /// Pins the algorithm instead of following the suggestion.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Checks the quantum.
    pub fn validate(&self) -> Result<NonZeroU32, SimulationError> {
        parse_quantum(self.quantum)
    }
}
