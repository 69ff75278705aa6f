//! Simulation configuration.
//!
//! Everything tunable about a run: which policy decides, how many cores
//! exist, and how expensive a context switch is. Configurations are plain
//! serde values and can be persisted as TOML.

use serde::{Deserialize, Serialize};

use crate::policy::{Fcfs, PriorityScheduler, RoundRobin, SchedulerPolicy, Sjf, Stcf};

/// Which scheduling policy drives the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    Fcfs,
    Sjf,
    Stcf,
    RoundRobin { time_quantum: u64 },
    Priority,
}

impl PolicyConfig {
    /// Instantiate the decision strategy this configuration names.
    pub fn build(&self) -> Box<dyn SchedulerPolicy> {
        match *self {
            PolicyConfig::Fcfs => Box::new(Fcfs),
            PolicyConfig::Sjf => Box::new(Sjf),
            PolicyConfig::Stcf => Box::new(Stcf),
            PolicyConfig::RoundRobin { time_quantum } => Box::new(RoundRobin::new(time_quantum)),
            PolicyConfig::Priority => Box::new(PriorityScheduler),
        }
    }
}

/// Complete configuration for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Context-switch overhead in ticks. Negative values are clamped to
    /// zero at core construction.
    pub dispatch_latency: i64,
    /// Number of simulated cores (minimum 1).
    pub num_cores: usize,
    /// Scheduling policy. Kept last so the TOML form serializes cleanly
    /// (tables after values).
    pub policy: PolicyConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            dispatch_latency: 0,
            num_cores: 1,
            policy: PolicyConfig::Fcfs,
        }
    }
}

impl SimulationConfig {
    /// Single-core, zero-latency run under the given policy.
    pub fn single_core(policy: PolicyConfig) -> Self {
        SimulationConfig {
            policy,
            ..Default::default()
        }
    }

    pub fn with_latency(mut self, dispatch_latency: i64) -> Self {
        self.dispatch_latency = dispatch_latency;
        self
    }

    pub fn with_cores(mut self, num_cores: usize) -> Self {
        self.num_cores = num_cores;
        self
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, toml_str)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> std::io::Result<Self> {
        let toml_str = std::fs::read_to_string(path)?;
        toml::from_str(&toml_str).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
