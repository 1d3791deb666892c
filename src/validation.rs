//! Input validation for scheduling problems.
//!
//! Checks process descriptors before they reach a scheduler. Detects:
//! - Duplicate pids
//! - Pids below 1
//! - Negative arrival times
//! - Non-positive burst times
//! - Priorities below 1
//! - Process lists whose simulated timeline would not fit in `i64`
//!
//! Every violation is reported, not just the first one, so a caller can
//! show the user all problems at once.

use std::collections::HashSet;
use std::fmt;

use crate::models::Process;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description naming the violated constraint.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same pid.
    DuplicatePid,
    /// Pid is 0.
    InvalidPid,
    /// Arrival time is below 0.
    NegativeArrival,
    /// Burst time is below 1.
    NonPositiveBurst,
    /// Priority is below 1.
    InvalidPriority,
    /// Latest arrival plus total burst exceeds [`MAX_HORIZON`].
    TimeOverflow,
}

/// Largest accepted `max(arrival) + Σ burst` of a process list.
///
/// Every clock value a scheduler reaches is bounded by this horizon, and
/// every per-process metric by twice it (Round-Robin waiting counts queued
/// time twice), so halving `i64::MAX` keeps all arithmetic in range.
pub const MAX_HORIZON: i64 = i64::MAX / 2;

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a single process descriptor.
pub fn validate_process(process: &Process) -> ValidationResult {
    let mut errors = Vec::new();
    check_fields(process, &mut errors);
    if let Some(error) = check_horizon(std::slice::from_ref(process)) {
        errors.push(error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a process list.
///
/// Checks:
/// 1. Every field constraint of every process
/// 2. No duplicate pids
/// 3. The whole list fits within [`MAX_HORIZON`]
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut pids = HashSet::new();

    for p in processes {
        if !pids.insert(p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate process ID: {}", p.pid),
            ));
        }
        check_fields(p, &mut errors);
    }

    if let Some(error) = check_horizon(processes) {
        errors.push(error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Flags lists whose `max(arrival) + Σ burst` exceeds [`MAX_HORIZON`].
fn check_horizon(processes: &[Process]) -> Option<ValidationError> {
    let latest_arrival = processes.iter().map(|p| p.arrival.max(0)).max()?;
    let horizon = processes
        .iter()
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst.max(0)))
        .filter(|&h| h <= MAX_HORIZON);

    match horizon {
        Some(_) => None,
        None => Some(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            format!("Latest arrival plus total burst time must not exceed {MAX_HORIZON}"),
        )),
    }
}

fn check_fields(p: &Process, errors: &mut Vec<ValidationError>) {
    if p.pid == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidPid,
            "Process ID must be at least 1",
        ));
    }
    if p.arrival < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeArrival,
            format!(
                "Process {} arrival time must be non-negative (got {})",
                p.pid, p.arrival
            ),
        ));
    }
    if p.burst < 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveBurst,
            format!(
                "Process {} burst time must be positive (got {})",
                p.pid, p.burst
            ),
        ));
    }
    if p.priority < 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidPriority,
            format!(
                "Process {} priority must be at least 1 (got {})",
                p.pid, p.priority
            ),
        ));
    }
}
