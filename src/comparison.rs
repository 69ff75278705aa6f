//! Policy comparison.
//!
//! Runs the same process set under every scheduling policy and tabulates
//! the resulting metrics side by side. Each run gets a fresh engine; the
//! runs are independent, so they go through rayon.

use rayon::prelude::*;

use crate::config::{PolicyConfig, SimulationConfig};
use crate::process::Process;
use crate::simulation::SimulationEngine;

/// Metrics for one policy over the shared workload.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PolicyMetrics {
    pub policy: String,
    pub total_time: u64,
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub cpu_utilization: String,
    pub hardware_efficiency: String,
    pub throughput: f64,
}

/// Side-by-side comparison of every policy on one workload.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PolicyComparison {
    pub entries: Vec<PolicyMetrics>,
}

impl PolicyComparison {
    /// Run all five policies over `processes` with the given hardware
    /// parameters.
    pub fn run(
        processes: &[Process],
        dispatch_latency: i64,
        time_quantum: u64,
        num_cores: usize,
    ) -> Self {
        let policies = [
            PolicyConfig::Fcfs,
            PolicyConfig::Sjf,
            PolicyConfig::Stcf,
            PolicyConfig::RoundRobin { time_quantum },
            PolicyConfig::Priority,
        ];

        let entries = policies
            .par_iter()
            .map(|&policy| {
                let config = SimulationConfig {
                    dispatch_latency,
                    num_cores,
                    policy,
                };
                let name = policy.build().name().to_string();
                let report = SimulationEngine::new(config).run(processes);
                PolicyMetrics {
                    policy: name,
                    total_time: report.total_time,
                    avg_waiting_time: report.averages.avg_waiting_time,
                    avg_turnaround_time: report.averages.avg_turnaround_time,
                    cpu_utilization: report.averages.cpu_utilization,
                    hardware_efficiency: report.averages.hardware_efficiency,
                    throughput: report.averages.throughput,
                }
            })
            .collect();

        PolicyComparison { entries }
    }

    /// The entry with the lowest average waiting time.
    pub fn best_by_waiting_time(&self) -> Option<&PolicyMetrics> {
        self.entries.iter().min_by(|a, b| {
            a.avg_waiting_time
                .partial_cmp(&b.avg_waiting_time)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

impl std::fmt::Display for PolicyComparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "╔══════════╦════════════╦════════════╦══════════════╦═════════════╦═════════════╦════════════╗"
        )?;
        writeln!(
            f,
            "║ Policy   ║ Total time ║ Avg wait   ║ Avg turnar.  ║ Utilization ║ Efficiency  ║ Throughput ║"
        )?;
        writeln!(
            f,
            "╠══════════╬════════════╬════════════╬══════════════╬═════════════╬═════════════╬════════════╣"
        )?;
        for m in &self.entries {
            writeln!(
                f,
                "║ {:<8} ║ {:>10} ║ {:>10.2} ║ {:>12.2} ║ {:>11} ║ {:>11} ║ {:>10.4} ║",
                m.policy,
                m.total_time,
                m.avg_waiting_time,
                m.avg_turnaround_time,
                m.cpu_utilization,
                m.hardware_efficiency,
                m.throughput
            )?;
        }
        writeln!(
            f,
            "╚══════════╩════════════╩════════════╩══════════════╩═════════════╩═════════════╩════════════╝"
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::workloads;

    #[test]
    fn test_comparison_covers_all_policies() {
        let comparison = PolicyComparison::run(&workloads::textbook(), 0, 2, 1);
        let names: Vec<_> = comparison.entries.iter().map(|m| m.policy.as_str()).collect();
        assert_eq!(names.len(), 5);
        for name in ["FCFS", "SJF", "STCF", "RR", "Priority"] {
            assert!(names.contains(&name), "missing {name}");
        }
    }

    #[test]
    fn test_comparison_matches_direct_run() {
        let procs = workloads::textbook();
        let comparison = PolicyComparison::run(&procs, 0, 2, 1);
        let fcfs_entry = comparison
            .entries
            .iter()
            .find(|m| m.policy == "FCFS")
            .unwrap();

        let report = SimulationEngine::new(SimulationConfig::default()).run(&procs);
        assert_eq!(fcfs_entry.total_time, report.total_time);
        assert_eq!(fcfs_entry.avg_waiting_time, report.averages.avg_waiting_time);
    }

    #[test]
    fn test_sjf_never_waits_longer_than_fcfs_here() {
        // On the textbook set SJF improves on FCFS by construction.
        let comparison = PolicyComparison::run(&workloads::textbook(), 0, 2, 1);
        let wait = |name: &str| {
            comparison
                .entries
                .iter()
                .find(|m| m.policy == name)
                .unwrap()
                .avg_waiting_time
        };
        assert!(wait("SJF") <= wait("FCFS"));
        assert_eq!(comparison.best_by_waiting_time().unwrap().policy, "SJF");
    }
}
