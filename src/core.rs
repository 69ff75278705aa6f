//! Simulated hardware: clock, dispatcher, and CPU core.
//!
//! "Multiple cores" here are simulated resources stepped in a fixed order
//! within one logical tick; there is no real parallelism. Each core wraps
//! one [`Dispatcher`] that models context-switch overhead, plus the
//! per-core execution bookkeeping the engine drives.

use crate::process::Process;

/// Monotonic tick counter. The whole simulation runs on this one heartbeat.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    time: u64,
}

impl Clock {
    pub fn new() -> Self {
        Clock::default()
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    /// Advance the system heartbeat by one unit and return the new time.
    pub fn tick(&mut self) -> u64 {
        self.time += 1;
        self.time
    }
}

/// Models the overhead of swapping the running process on a core.
///
/// Two states: idle (`current_switch_remaining == 0`) and switching
/// (`> 0`). A zero-latency switch is not a state transition at all; callers
/// with `dispatch_latency == 0` perform the swap directly instead of going
/// through [`Dispatcher::start_switch`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    /// Fixed overhead, in ticks, per context switch.
    pub dispatch_latency: u64,
    /// Ticks left in the switch currently in progress.
    pub current_switch_remaining: u64,
    /// Who runs once the switch completes (`None` = switching to idle).
    pub target_pid: Option<u32>,
}

impl Dispatcher {
    /// A negative configured latency is clamped to zero, never rejected.
    pub fn new(dispatch_latency: i64) -> Self {
        Dispatcher {
            dispatch_latency: dispatch_latency.max(0) as u64,
            current_switch_remaining: 0,
            target_pid: None,
        }
    }

    pub fn is_currently_switching(&self) -> bool {
        self.current_switch_remaining > 0
    }

    /// Begin the overhead period toward a new occupant (idle permitted).
    pub fn start_switch(&mut self, target_pid: Option<u32>) {
        self.target_pid = target_pid;
        self.current_switch_remaining = self.dispatch_latency;
    }

    /// Burn one tick of switch overhead.
    ///
    /// # Panics
    ///
    /// Panics if no switch is in progress. That is a contract violation in
    /// the engine's state machine, not a recoverable input condition.
    pub fn tick(&mut self) {
        if self.current_switch_remaining == 0 {
            panic!("dispatcher ticked with no context switch in progress");
        }
        self.current_switch_remaining -= 1;
    }
}

/// One simulated CPU resource.
///
/// Per tick, exactly one of three modes holds: occupied (a current process
/// and no switch in progress), switching, or idle.
#[derive(Debug, Clone)]
pub struct Core {
    pub core_id: usize,
    pub dispatcher: Dispatcher,
    /// The occupant. During a switch this still reflects the prior occupant
    /// until the swap completes.
    pub current_process: Option<Process>,
    /// Pending swap-in, held while the dispatcher counts down.
    pub target_process: Option<Process>,
    /// Ticks since the current process started this slice.
    pub current_runtime: u64,
    pub idle_time: u64,
    pub switch_time: u64,
}

impl Core {
    pub fn new(core_id: usize, dispatch_latency: i64) -> Self {
        Core {
            core_id,
            dispatcher: Dispatcher::new(dispatch_latency),
            current_process: None,
            target_process: None,
            current_runtime: 0,
            idle_time: 0,
            switch_time: 0,
        }
    }

    /// Tell the core to start running a new occupant (`None` = go idle).
    ///
    /// With a positive dispatch latency the swap is deferred through the
    /// dispatcher and `current_process` keeps the prior occupant until the
    /// switch completes; with zero latency the swap is instantaneous. The
    /// asymmetry is what makes dispatch overhead optional without
    /// special-casing callers.
    pub fn assign(&mut self, process: Option<Process>) {
        if self.dispatcher.dispatch_latency > 0 {
            self.dispatcher.start_switch(process.map(|p| p.pid));
            self.target_process = process;
        } else {
            self.current_process = process;
            self.current_runtime = 0;
        }
    }

    pub fn is_switching(&self) -> bool {
        self.dispatcher.is_currently_switching()
    }

    pub fn current_pid(&self) -> Option<u32> {
        self.current_process.map(|p| p.pid)
    }

    /// True while the core still holds work: an occupant or an unfinished
    /// switch.
    pub fn is_active(&self) -> bool {
        self.current_process.is_some() || self.is_switching()
    }
}
