//! Statistics collection and the final report.
//!
//! The collector accumulates one [`ProcessResult`] per completion; at the
//! end of a run it derives the aggregate block from the results, the
//! per-core counters, and the trace. Report keys are the stable wire format
//! consumed by external renderers.

use serde::{Deserialize, Serialize};

use crate::core::Core;
use crate::process::{Process, ProcessResult};
use crate::trace::{TraceEvent, Tracer};

/// Accumulates completions and derives the final report.
#[derive(Debug, Default)]
pub struct StatsCollector {
    results: Vec<ProcessResult>,
}

/// One row of the `individual_results` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub pid: u32,
    pub arrival: u64,
    pub burst: u64,
    pub wait: u64,
    pub turnaround: u64,
    pub completion: u64,
}

/// The aggregate block of the report.
///
/// Utilization counts context-switch overhead as busy time; efficiency
/// counts only useful burst work. The two coincide exactly when no switch
/// overhead was paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub cpu_utilization: String,
    pub hardware_efficiency: String,
    pub throughput: f64,
}

/// Full simulation output: per-process rows, the aggregate block, the
/// structured trace, and the total elapsed time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub individual_results: Vec<ResultRow>,
    pub averages: AggregateMetrics,
    pub structured_trace: Vec<TraceEvent>,
    pub total_time: u64,
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

impl StatsCollector {
    pub fn new() -> Self {
        StatsCollector::default()
    }

    /// Store the outcome for one finished process. Called exactly once per
    /// process, at the tick its remaining burst reaches zero.
    pub fn record_completion(&mut self, process: Process, finish_time: u64) {
        let turnaround = finish_time - process.arrival_time;
        let wait = turnaround - process.burst_time;
        self.results.push(ProcessResult {
            process,
            waiting_time: wait,
            turnaround_time: turnaround,
            completion_time: finish_time,
        });
    }

    pub fn results(&self) -> &[ProcessResult] {
        &self.results
    }

    /// Derive the final report. Degenerate inputs (no completions, zero
    /// elapsed time) yield zeroed metrics rather than a division by zero.
    pub fn generate_report(
        &self,
        total_time: u64,
        total_burst: u64,
        cores: &[Core],
        tracer: &Tracer,
    ) -> SimulationReport {
        let n = self.results.len();

        let (avg_wait, avg_tat) = if n == 0 {
            (0.0, 0.0)
        } else {
            let wait_sum: u64 = self.results.iter().map(|r| r.waiting_time).sum();
            let tat_sum: u64 = self.results.iter().map(|r| r.turnaround_time).sum();
            (wait_sum as f64 / n as f64, tat_sum as f64 / n as f64)
        };

        let total_switch: u64 = cores.iter().map(|c| c.switch_time).sum();

        let (utilization, efficiency, throughput) = if total_time == 0 {
            (0.0, 0.0, 0.0)
        } else {
            let busy = (total_burst + total_switch) as f64;
            let span = total_time as f64;
            (
                (busy / span * 100.0).min(100.0),
                total_burst as f64 / span * 100.0,
                n as f64 / span,
            )
        };

        SimulationReport {
            individual_results: self
                .results
                .iter()
                .map(|r| ResultRow {
                    pid: r.process.pid,
                    arrival: r.process.arrival_time,
                    burst: r.process.burst_time,
                    wait: r.waiting_time,
                    turnaround: r.turnaround_time,
                    completion: r.completion_time,
                })
                .collect(),
            averages: AggregateMetrics {
                avg_waiting_time: round_to(avg_wait, 2),
                avg_turnaround_time: round_to(avg_tat, 2),
                cpu_utilization: format!("{:.1}%", utilization),
                hardware_efficiency: format!("{:.1}%", efficiency),
                throughput: round_to(throughput, 4),
            },
            structured_trace: tracer.events().to_vec(),
            total_time,
        }
    }
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "╔═══════╦═════════╦═══════╦═══════╦════════════╦════════════╗")?;
        writeln!(f, "║  PID  ║ Arrival ║ Burst ║ Wait  ║ Turnaround ║ Completion ║")?;
        writeln!(f, "╠═══════╬═════════╬═══════╬═══════╬════════════╬════════════╣")?;
        for row in &self.individual_results {
            writeln!(
                f,
                "║ {:>5} ║ {:>7} ║ {:>5} ║ {:>5} ║ {:>10} ║ {:>10} ║",
                row.pid, row.arrival, row.burst, row.wait, row.turnaround, row.completion
            )?;
        }
        writeln!(f, "╚═══════╩═════════╩═══════╩═══════╩════════════╩════════════╝")?;
        writeln!(f, "Total time:          {}", self.total_time)?;
        writeln!(f, "Avg waiting time:    {:.2}", self.averages.avg_waiting_time)?;
        writeln!(f, "Avg turnaround time: {:.2}", self.averages.avg_turnaround_time)?;
        writeln!(f, "CPU utilization:     {}", self.averages.cpu_utilization)?;
        writeln!(f, "Hardware efficiency: {}", self.averages.hardware_efficiency)?;
        writeln!(f, "Throughput:          {:.4}", self.averages.throughput)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_math() {
        let mut stats = StatsCollector::new();
        stats.record_completion(Process::new(1, 3, 2), 9);

        let r = stats.results()[0];
        assert_eq!(r.turnaround_time, 7); // 9 - 2
        assert_eq!(r.waiting_time, 4); // 7 - 3
        assert_eq!(r.completion_time, 9);
    }

    #[test]
    fn test_empty_report_is_zeroed() {
        let stats = StatsCollector::new();
        let report = stats.generate_report(0, 0, &[], &Tracer::new());

        assert!(report.individual_results.is_empty());
        assert_eq!(report.averages.avg_waiting_time, 0.0);
        assert_eq!(report.averages.avg_turnaround_time, 0.0);
        assert_eq!(report.averages.cpu_utilization, "0.0%");
        assert_eq!(report.averages.hardware_efficiency, "0.0%");
        assert_eq!(report.averages.throughput, 0.0);
        assert_eq!(report.total_time, 0);
    }

    #[test]
    fn test_utilization_includes_switch_overhead() {
        let mut stats = StatsCollector::new();
        stats.record_completion(Process::new(1, 4, 0), 6);

        let mut core = Core::new(0, 1);
        core.switch_time = 2;

        // 6 ticks total: 4 of work, 2 of switching.
        let report = stats.generate_report(6, 4, &[core], &Tracer::new());
        assert_eq!(report.averages.cpu_utilization, "100.0%");
        assert_eq!(report.averages.hardware_efficiency, "66.7%");
    }

    #[test]
    fn test_utilization_capped_at_100() {
        // Two cores can do more burst work than the elapsed span.
        let mut stats = StatsCollector::new();
        stats.record_completion(Process::new(1, 8, 0), 8);
        stats.record_completion(Process::new(2, 8, 0), 8);

        let cores = [Core::new(0, 0), Core::new(1, 0)];
        let report = stats.generate_report(8, 16, &cores, &Tracer::new());
        assert_eq!(report.averages.cpu_utilization, "100.0%");
        assert_eq!(report.averages.throughput, 0.25);
    }

    #[test]
    fn test_rounding() {
        let mut stats = StatsCollector::new();
        stats.record_completion(Process::new(1, 1, 0), 1);
        stats.record_completion(Process::new(2, 1, 0), 2);
        stats.record_completion(Process::new(3, 1, 0), 3);

        // Waits are 0, 1, 2: average 1.0; turnarounds 1, 2, 3: average 2.0.
        let report = stats.generate_report(3, 3, &[Core::new(0, 0)], &Tracer::new());
        assert_eq!(report.averages.avg_waiting_time, 1.0);
        assert_eq!(report.averages.avg_turnaround_time, 2.0);
        // 3 completions / 3 ticks.
        assert_eq!(report.averages.throughput, 1.0);
    }

    #[test]
    fn test_report_wire_shape() {
        let mut stats = StatsCollector::new();
        stats.record_completion(Process::new(1, 2, 0), 2);
        let mut tracer = Tracer::new();
        tracer.record(0, crate::trace::EventKind::Exec, Some(1));

        let report = stats.generate_report(2, 2, &[Core::new(0, 0)], &tracer);
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("individual_results").is_some());
        assert!(json.get("averages").is_some());
        assert!(json.get("structured_trace").is_some());
        assert!(json.get("total_time").is_some());
        assert_eq!(json["structured_trace"][0]["event_type"], "EXEC");
        assert_eq!(json["individual_results"][0]["pid"], 1);
    }
}
