//! Dispatching rules and rule engine for non-preemptive scheduling.
//!
//! A dispatching rule scores every ready process; the process with the
//! lowest score is dispatched next. SJF and Priority scheduling are the
//! same dispatch loop driven by different rules.
//!
//! # Usage
//!
//! ```
//! use u_procsched::dispatching::{RuleEngine, SchedulingContext};
//! use u_procsched::dispatching::rules;
//! use u_procsched::models::Process;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::PriorityRule)
//!     .with_tie_breaker(rules::Spt);
//!
//! let ready = vec![
//!     Process::new(1).with_burst(8).with_priority(2),
//!     Process::new(2).with_burst(3).with_priority(1),
//! ];
//! let context = SchedulingContext::at_time(0);
//! assert_eq!(engine.select_best(&ready, &context), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::RuleEngine;

use crate::models::Process;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = f64;

/// A dispatching rule that evaluates process priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for processes that should run first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "FIFO").
    fn name(&self) -> &'static str;

    /// Evaluates a ready process at the current simulation time.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, process: &Process, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
