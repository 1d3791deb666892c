//! Scheduling algorithm tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SimulationError;

/// A CPU scheduling discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come-First-Served.
    #[serde(rename = "fcfs")]
    Fcfs,
    /// Shortest-Job-First (non-preemptive).
    #[serde(rename = "sjf")]
    Sjf,
    /// Round-Robin with a fixed quantum.
    #[serde(rename = "rr")]
    RoundRobin,
    /// Priority scheduling (non-preemptive, 1 = highest).
    #[serde(rename = "priority")]
    Priority,
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::RoundRobin,
        Algorithm::Priority,
    ];

    /// Short tag (`fcfs`, `sjf`, `rr`, `priority`).
    pub fn tag(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::RoundRobin => "rr",
            Algorithm::Priority => "priority",
        }
    }

    /// Human-readable name as shown to users.
    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "First Come First Serve",
            Algorithm::Sjf => "Shortest Job First",
            Algorithm::RoundRobin => "Round Robin",
            Algorithm::Priority => "Priority Scheduling",
        }
    }

    /// Whether a running process can be interrupted.
    pub fn preemptive(self) -> bool {
        matches!(self, Algorithm::RoundRobin)
    }

    /// Whether the algorithm needs a quantum.
    pub fn needs_quantum(self) -> bool {
        self.preemptive()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = SimulationError;

    /// Parses a short tag or display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Algorithm::ALL
            .into_iter()
            .find(|a| {
                needle.eq_ignore_ascii_case(a.tag()) || needle.eq_ignore_ascii_case(a.display_name())
            })
            .ok_or_else(|| SimulationError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!("fcfs".parse::<Algorithm>().unwrap(), Algorithm::Fcfs);
        assert_eq!("SJF".parse::<Algorithm>().unwrap(), Algorithm::Sjf);
        assert_eq!(" rr ".parse::<Algorithm>().unwrap(), Algorithm::RoundRobin);
        assert_eq!("Priority".parse::<Algorithm>().unwrap(), Algorithm::Priority);
    }

    #[test]
    fn test_parse_display_names() {
        for a in Algorithm::ALL {
            assert_eq!(a.display_name().parse::<Algorithm>().unwrap(), a);
        }
        assert_eq!(
            "round robin".parse::<Algorithm>().unwrap(),
            Algorithm::RoundRobin
        );
    }

    #[test]
    fn test_parse_unknown() {
        let err = "srtf".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, SimulationError::UnknownAlgorithm(ref s) if s == "srtf"));
    }

    #[test]
    fn test_only_rr_is_preemptive() {
        assert!(Algorithm::RoundRobin.preemptive());
        assert!(Algorithm::RoundRobin.needs_quantum());
        assert!(!Algorithm::Fcfs.preemptive());
        assert!(!Algorithm::Sjf.preemptive());
        assert!(!Algorithm::Priority.preemptive());
    }

    #[test]
    fn test_serde_uses_tags() {
        assert_eq!(
            serde_json::to_string(&Algorithm::RoundRobin).unwrap(),
            r#""rr""#
        );
        let a: Algorithm = serde_json::from_str(r#""priority""#).unwrap();
        assert_eq!(a, Algorithm::Priority);
    }

    #[test]
    fn test_display() {
        assert_eq!(Algorithm::Fcfs.to_string(), "First Come First Serve");
    }
}
