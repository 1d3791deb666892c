//! Scheduling domain models.
//!
//! Provides the data types shared by the CPU scheduling simulator:
//! process descriptors, the user's process table, the produced CPU
//! timeline, and a random workload generator.
//!
//! # Domain Mappings
//!
//! | u-procsched | Textbook term | Gantt chart |
//! |-------------|---------------|-------------|
//! | Process | PCB / job | Row |
//! | ScheduleEntry | CPU burst slice | Bar |
//! | Schedule | Execution order | Whole chart |

mod process;
mod schedule;
mod workload;

pub use process::{Pid, Process, ProcessTable};
pub use schedule::{Schedule, ScheduleEntry};
pub use workload::WorkloadGenerator;
