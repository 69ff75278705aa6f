//! CPU Scheduling Simulator
//!
//! An offline discrete-time simulator of CPU scheduling algorithms. Given a
//! fixed set of processes (arrival time, burst time, priority), it computes,
//! tick by tick, which process occupies which core, how long context
//! switches take, and derives per-process and aggregate performance metrics
//! (waiting time, turnaround time, utilization, efficiency, throughput).
//!
//! # Overview
//!
//! The engine feeds a time-sorted arrival stream into a shared ready queue,
//! asks the configured policy once per core per tick which process should
//! run, drives a per-core dispatcher state machine for context-switch
//! overhead, executes work, and feeds completions into a statistics
//! collector. Policies are pure decision functions; the engine owns every
//! mutation of the shared scheduling state.
//!
//! Five policies are built in: FCFS, SJF, STCF (preemptive SJF), Round
//! Robin, and non-preemptive priority scheduling.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cpu_sched_sim::prelude::*;
//!
//! let processes = vec![
//!     Process::new(1, 5, 0),
//!     Process::new(2, 3, 0),
//!     Process::new(3, 8, 0),
//! ];
//!
//! let config = SimulationConfig::single_core(PolicyConfig::Stcf);
//! let mut sim = SimulationEngine::new(config);
//! let report = sim.run(&processes);
//!
//! println!("{}", report);
//! ```
//!
//! # Determinism
//!
//! A run is single-threaded and turn-based: simulated cores are stepped in
//! ascending id order within each logical tick, so the same inputs always
//! produce the same trace. Engines are built fresh per run; nothing is
//! shared across runs.

pub mod comparison;
pub mod config;
pub mod core;
pub mod policy;
pub mod process;
pub mod simulation;
pub mod stats;
pub mod trace;
pub mod workloads;

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::comparison::{PolicyComparison, PolicyMetrics};
    pub use crate::config::{PolicyConfig, SimulationConfig};
    pub use crate::core::{Clock, Core, Dispatcher};
    pub use crate::policy::{
        Fcfs, PriorityScheduler, RoundRobin, SchedulerPolicy, Sjf, Stcf,
    };
    pub use crate::process::{Process, ProcessResult};
    pub use crate::simulation::{run, SimulationEngine};
    pub use crate::stats::{AggregateMetrics, ResultRow, SimulationReport, StatsCollector};
    pub use crate::trace::{EventKind, TraceEvent, Tracer};
    pub use crate::workloads::{RandomWorkload, WorkloadConfig};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
