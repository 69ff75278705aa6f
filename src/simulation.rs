//! The simulation engine.
//!
//! Drives the tick loop over a fixed process set: admit arrivals, consult
//! the policy once per core, step each core's dispatcher-or-execution state,
//! advance the clock. Completions feed the stats collector; every state
//! change lands in the tracer.
//!
//! The engine is the sole owner of the shared scheduling state (ready queue
//! and remaining-time table). Policies see that state read-only and answer
//! with a pid; the engine performs every queue mutation itself, including
//! the preemption dance of returning the displaced occupant to the back of
//! the queue before removing the new selection.

use std::collections::{HashMap, VecDeque};

use crate::config::SimulationConfig;
use crate::core::{Clock, Core};
use crate::policy::SchedulerPolicy;
use crate::process::Process;
use crate::stats::{SimulationReport, StatsCollector};
use crate::trace::{EventKind, Tracer};

/// Orchestrates one simulation run.
///
/// Clock, tracer, stats, and cores are created fresh per engine instance;
/// build a new engine for each run rather than reusing one.
pub struct SimulationEngine {
    pub config: SimulationConfig,
    pub clock: Clock,
    pub tracer: Tracer,
    pub stats: StatsCollector,
    pub cores: Vec<Core>,
    policy: Box<dyn SchedulerPolicy>,
    ready_queue: VecDeque<Process>,
    remaining_times: HashMap<u32, u64>,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        let cores = (0..config.num_cores.max(1))
            .map(|id| Core::new(id, config.dispatch_latency))
            .collect();
        let policy = config.policy.build();
        SimulationEngine {
            config,
            clock: Clock::new(),
            tracer: Tracer::new(),
            stats: StatsCollector::new(),
            cores,
            policy,
            ready_queue: VecDeque::new(),
            remaining_times: HashMap::new(),
        }
    }

    /// Run the simulation to completion and return the final report.
    ///
    /// Terminates once the incoming stream, the ready queue, and every core
    /// are simultaneously drained; bounded by the sum of burst times plus
    /// total switch overhead.
    pub fn run(&mut self, processes: &[Process]) -> SimulationReport {
        let mut sorted: Vec<Process> = processes.to_vec();
        sorted.sort_by_key(|p| (p.arrival_time, p.pid));
        let mut incoming: VecDeque<Process> = sorted.into();

        self.remaining_times = incoming.iter().map(|p| (p.pid, p.burst_time)).collect();

        while self.simulation_active(&incoming) {
            self.handle_arrivals(&mut incoming);
            self.assess_cores();
            self.execute_tick();
            self.clock.tick();
        }

        let total_burst: u64 = processes.iter().map(|p| p.burst_time).sum();
        self.stats
            .generate_report(self.clock.time(), total_burst, &self.cores, &self.tracer)
    }

    fn simulation_active(&self, incoming: &VecDeque<Process>) -> bool {
        !incoming.is_empty()
            || !self.ready_queue.is_empty()
            || self.cores.iter().any(|c| c.is_active())
    }

    /// Phase 1: admit every process whose arrival time has been reached.
    fn handle_arrivals(&mut self, incoming: &mut VecDeque<Process>) {
        while let Some(&new_proc) = incoming.front() {
            if new_proc.arrival_time > self.clock.time() {
                break;
            }
            incoming.pop_front();
            self.tracer
                .record(self.clock.time(), EventKind::Arrival, Some(new_proc.pid));
            self.tracer
                .log(self.clock.time(), format!("Process {} arrived", new_proc.pid));
            self.ready_queue.push_back(new_proc);
        }
    }

    /// Phase 2: consult the policy once per core, in ascending core id
    /// order. Cores mid-switch are skipped; the shared queue and
    /// remaining-time table guarantee no two cores are handed the same
    /// process within one tick.
    fn assess_cores(&mut self) {
        for idx in 0..self.cores.len() {
            if self.cores[idx].is_switching() {
                continue;
            }

            let choice = self.policy.select(
                &self.ready_queue,
                self.cores[idx].current_process.as_ref(),
                self.cores[idx].current_runtime,
                &self.remaining_times,
            );

            if choice == self.cores[idx].current_pid() {
                continue;
            }

            // Displaced occupant goes back in line before the new pick
            // leaves it, so preemption and selection share one primitive.
            if let Some(prev) = self.cores[idx].current_process {
                self.ready_queue.push_back(prev);
            }
            let next = choice.map(|pid| self.take_from_ready(pid));
            self.cores[idx].assign(next);

            if self.cores[idx].is_switching() {
                self.tracer
                    .record(self.clock.time(), EventKind::SwitchStart, choice);
            }
        }
    }

    fn take_from_ready(&mut self, pid: u32) -> Process {
        match self.ready_queue.iter().position(|p| p.pid == pid) {
            Some(pos) => self.ready_queue.remove(pos).unwrap(),
            None => panic!("policy selected pid {pid} which is not in the ready queue"),
        }
    }

    /// Phase 3: one tick of hardware time per core: burn switch overhead,
    /// execute a unit of work, or sit idle.
    fn execute_tick(&mut self) {
        let time = self.clock.time();
        let mut finished: Vec<u32> = Vec::new();
        for idx in 0..self.cores.len() {
            if self.cores[idx].is_switching() {
                let core = &mut self.cores[idx];
                core.switch_time += 1;
                self.tracer
                    .record(time, EventKind::Switch, core.dispatcher.target_pid);
                core.dispatcher.tick();
                if !core.dispatcher.is_currently_switching() {
                    core.current_process = core.target_process.take();
                    core.current_runtime = 0;
                }
            } else if let Some(proc) = self.cores[idx].current_process {
                self.tracer.record(time, EventKind::Exec, Some(proc.pid));
                let left = match self.remaining_times.get_mut(&proc.pid) {
                    Some(left) => {
                        *left -= 1;
                        *left
                    }
                    None => panic!("no remaining-time entry for pid {}", proc.pid),
                };
                self.cores[idx].current_runtime += 1;

                if left == 0 {
                    // Work in tick t occupies [t, t+1), so completion lands
                    // at t + 1.
                    self.stats.record_completion(proc, time + 1);
                    finished.push(proc.pid);
                    self.cores[idx].current_process = None;
                    self.cores[idx].current_runtime = 0;
                }
            } else {
                self.cores[idx].idle_time += 1;
                self.tracer.record(time, EventKind::Idle, None);
            }
        }

        // Completion events carry time t + 1, so they go in only after
        // every core has logged its tick-t event; the trace stays
        // chronological with no re-sorting.
        for pid in finished {
            self.tracer.record(time + 1, EventKind::Finished, Some(pid));
            self.tracer.log(time + 1, format!("Process {} finished", pid));
        }
    }
}

/// Convenience entry point: run `processes` under `config` and return the
/// report.
pub fn run(config: SimulationConfig, processes: &[Process]) -> SimulationReport {
    SimulationEngine::new(config).run(processes)
}
