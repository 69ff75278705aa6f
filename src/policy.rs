//! Scheduling policies.
//!
//! A policy is a pure decision function: given the ready queue, the core's
//! current occupant, how long that occupant has held its slice, and the
//! remaining-burst table, it answers which pid should occupy the core for
//! the next tick (`None` = idle). Returning the current pid
//! means "keep running"; returning anything else is a transition the engine
//! carries out. All ready-queue and remaining-time mutation is centralized
//! in the engine; policies never touch shared state.

use std::collections::{HashMap, VecDeque};

use crate::process::Process;

/// Decision strategy consulted once per core per tick.
pub trait SchedulerPolicy: Send + Sync {
    /// Human-readable policy name for reports and comparisons.
    fn name(&self) -> &'static str;

    /// Pick the pid that should occupy the core for the next tick.
    fn select(
        &self,
        ready_queue: &VecDeque<Process>,
        current: Option<&Process>,
        current_runtime: u64,
        remaining: &HashMap<u32, u64>,
    ) -> Option<u32>;
}

/// First-Come, First-Served. Non-preemptive: whoever holds the core keeps
/// it until completion; an idle core takes the head of the queue. Queue
/// order is arrival order (ties broken by pid at admission time).
#[derive(Debug, Default)]
pub struct Fcfs;

impl SchedulerPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn select(
        &self,
        ready_queue: &VecDeque<Process>,
        current: Option<&Process>,
        _current_runtime: u64,
        _remaining: &HashMap<u32, u64>,
    ) -> Option<u32> {
        if let Some(current) = current {
            return Some(current.pid);
        }
        ready_queue.front().map(|p| p.pid)
    }
}

/// Shortest Job First. Non-preemptive: an idle core takes the queue member
/// with the smallest original burst time, ties by ascending pid.
#[derive(Debug, Default)]
pub struct Sjf;

impl SchedulerPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn select(
        &self,
        ready_queue: &VecDeque<Process>,
        current: Option<&Process>,
        _current_runtime: u64,
        _remaining: &HashMap<u32, u64>,
    ) -> Option<u32> {
        if let Some(current) = current {
            return Some(current.pid);
        }
        ready_queue
            .iter()
            .min_by_key(|p| (p.burst_time, p.pid))
            .map(|p| p.pid)
    }
}

/// Shortest Time-to-Completion First, the preemptive SJF. The core always runs
/// the process with the least remaining burst; the occupant is displaced
/// only when a queue member is *strictly* shorter. Ties by ascending pid.
#[derive(Debug, Default)]
pub struct Stcf;

impl SchedulerPolicy for Stcf {
    fn name(&self) -> &'static str {
        "STCF"
    }

    fn select(
        &self,
        ready_queue: &VecDeque<Process>,
        current: Option<&Process>,
        _current_runtime: u64,
        remaining: &HashMap<u32, u64>,
    ) -> Option<u32> {
        let best_in_queue = ready_queue
            .iter()
            .min_by_key(|p| (remaining[&p.pid], p.pid));

        match (current, best_in_queue) {
            (Some(current), Some(best)) => {
                if remaining[&best.pid] < remaining[&current.pid] {
                    Some(best.pid)
                } else {
                    Some(current.pid)
                }
            }
            (Some(current), None) => Some(current.pid),
            (None, best) => best.map(|p| p.pid),
        }
    }
}

/// Round Robin with a fixed time quantum. An occupant whose slice has
/// reached the quantum is preempted unconditionally and the head of the
/// queue takes over; the quantum check happens strictly before any other
/// queue inspection. With an empty queue the occupant simply keeps running.
#[derive(Debug)]
pub struct RoundRobin {
    time_quantum: u64,
}

impl RoundRobin {
    /// A quantum below 1 is clamped to 1.
    pub fn new(time_quantum: u64) -> Self {
        RoundRobin {
            time_quantum: time_quantum.max(1),
        }
    }

    pub fn time_quantum(&self) -> u64 {
        self.time_quantum
    }
}

impl SchedulerPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn select(
        &self,
        ready_queue: &VecDeque<Process>,
        current: Option<&Process>,
        current_runtime: u64,
        _remaining: &HashMap<u32, u64>,
    ) -> Option<u32> {
        if let Some(current) = current {
            if current_runtime >= self.time_quantum {
                // Forced rotation: the occupant goes to the back of the
                // line and the head (if any) takes over.
                return ready_queue.front().map(|p| p.pid).or(Some(current.pid));
            }
            return Some(current.pid);
        }
        ready_queue.front().map(|p| p.pid)
    }
}

/// Non-preemptive priority scheduling. Same queueing discipline as SJF but
/// keyed on `priority_time`; lower value = higher priority, ties by
/// ascending pid.
#[derive(Debug, Default)]
pub struct PriorityScheduler;

impl SchedulerPolicy for PriorityScheduler {
    fn name(&self) -> &'static str {
        "Priority"
    }

    fn select(
        &self,
        ready_queue: &VecDeque<Process>,
        current: Option<&Process>,
        _current_runtime: u64,
        _remaining: &HashMap<u32, u64>,
    ) -> Option<u32> {
        if let Some(current) = current {
            return Some(current.pid);
        }
        ready_queue
            .iter()
            .min_by_key(|p| (p.priority_time, p.pid))
            .map(|p| p.pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(procs: &[Process]) -> VecDeque<Process> {
        procs.iter().copied().collect()
    }

    fn remaining(procs: &[Process]) -> HashMap<u32, u64> {
        procs.iter().map(|p| (p.pid, p.burst_time)).collect()
    }

    #[test]
    fn test_fcfs_keeps_current_and_takes_head() {
        let procs = [Process::new(1, 5, 0), Process::new(2, 3, 0)];
        let q = queue(&procs);
        let rem = remaining(&procs);

        let running = Process::new(9, 4, 0);
        assert_eq!(Fcfs.select(&q, Some(&running), 3, &rem), Some(9));
        assert_eq!(Fcfs.select(&q, None, 0, &rem), Some(1));
        assert_eq!(Fcfs.select(&VecDeque::new(), None, 0, &rem), None);
    }

    #[test]
    fn test_sjf_picks_smallest_burst_with_pid_tiebreak() {
        let procs = [
            Process::new(3, 4, 0),
            Process::new(1, 4, 0),
            Process::new(2, 9, 0),
        ];
        let q = queue(&procs);
        let rem = remaining(&procs);
        assert_eq!(Sjf.select(&q, None, 0, &rem), Some(1));
    }

    #[test]
    fn test_stcf_preempts_only_strictly_shorter() {
        let procs = [Process::new(2, 4, 1)];
        let q = queue(&procs);
        let mut rem = remaining(&procs);
        let current = Process::new(1, 8, 0);
        rem.insert(1, 7);

        // 4 < 7: preempt.
        assert_eq!(Stcf.select(&q, Some(&current), 1, &rem), Some(2));

        // Equal remaining: keep the occupant.
        rem.insert(1, 4);
        assert_eq!(Stcf.select(&q, Some(&current), 1, &rem), Some(1));

        // Idle core picks the best candidate.
        assert_eq!(Stcf.select(&q, None, 0, &rem), Some(2));
        assert_eq!(Stcf.select(&VecDeque::new(), None, 0, &rem), None);
    }

    #[test]
    fn test_round_robin_rotates_on_quantum_expiry() {
        let procs = [Process::new(2, 4, 0)];
        let q = queue(&procs);
        let rem = remaining(&procs);
        let current = Process::new(1, 4, 0);

        let rr = RoundRobin::new(2);
        assert_eq!(rr.select(&q, Some(&current), 1, &rem), Some(1));
        assert_eq!(rr.select(&q, Some(&current), 2, &rem), Some(2));
    }

    #[test]
    fn test_round_robin_expiry_with_empty_queue_keeps_current() {
        let rem = HashMap::from([(1, 2)]);
        let current = Process::new(1, 4, 0);
        let rr = RoundRobin::new(2);
        assert_eq!(rr.select(&VecDeque::new(), Some(&current), 5, &rem), Some(1));
    }

    #[test]
    fn test_round_robin_quantum_clamped_to_one() {
        assert_eq!(RoundRobin::new(0).time_quantum(), 1);
    }

    #[test]
    fn test_priority_lower_value_wins() {
        let procs = [
            Process::new(1, 5, 0).with_priority(3),
            Process::new(2, 5, 0).with_priority(-2),
            Process::new(3, 5, 0).with_priority(-2),
        ];
        let q = queue(&procs);
        let rem = remaining(&procs);
        assert_eq!(PriorityScheduler.select(&q, None, 0, &rem), Some(2));
    }
}
