//! Process value types.
//!
//! A [`Process`] is the immutable input record for one job: how much CPU it
//! needs, when it shows up, and an optional priority for priority-aware
//! policies. A [`ProcessResult`] is the immutable outcome derived once, at
//! the tick the process's remaining burst reaches zero.

use serde::{Deserialize, Serialize};

/// The input data for a process. Created once from external input and never
/// mutated; all bookkeeping (remaining burst, runtime) lives in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique identifier.
    pub pid: u32,
    /// Total CPU units required.
    pub burst_time: u64,
    /// Tick at which the process becomes eligible to run.
    #[serde(default)]
    pub arrival_time: u64,
    /// Ordering key for priority-aware policies (lower = higher priority).
    #[serde(default)]
    pub priority_time: i64,
}

impl Process {
    pub fn new(pid: u32, burst_time: u64, arrival_time: u64) -> Self {
        Process {
            pid,
            burst_time,
            arrival_time,
            priority_time: 0,
        }
    }

    pub fn with_priority(mut self, priority_time: i64) -> Self {
        self.priority_time = priority_time;
        self
    }
}

/// The outcome of a process after simulation.
///
/// `turnaround_time = completion_time - arrival_time` and
/// `waiting_time = turnaround_time - burst_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub process: Process,
    pub waiting_time: u64,
    pub turnaround_time: u64,
    pub completion_time: u64,
}
