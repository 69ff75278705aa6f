//! Structured event trace.
//!
//! The tracer is an append-only log of everything that happened, tick by
//! tick. Insertion order equals chronological (and causal, within a tick)
//! order, so a Gantt-style renderer can consume `structured_trace` from the
//! final report without re-sorting.

use serde::{Deserialize, Serialize};

/// What happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A process entered the ready queue.
    Arrival,
    /// A core began a context switch toward a new occupant.
    SwitchStart,
    /// A core spent this tick inside a context switch.
    Switch,
    /// A core executed one unit of work for a process.
    Exec,
    /// A core had nothing to run.
    Idle,
    /// A process's remaining burst reached zero.
    Finished,
}

/// One immutable trace record. `pid` is absent for events with no subject
/// (a genuinely idle tick, a switch toward idle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub time: u64,
    #[serde(rename = "event_type")]
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
}

/// Append-only event log plus a human-readable side channel.
#[derive(Debug, Default)]
pub struct Tracer {
    events: Vec<TraceEvent>,
    log: Vec<String>,
}

impl Tracer {
    pub fn new() -> Self {
        Tracer::default()
    }

    /// Record a structured event.
    pub fn record(&mut self, time: u64, kind: EventKind, pid: Option<u32>) {
        self.events.push(TraceEvent { time, kind, pid });
    }

    /// Record a human-readable line alongside the structured stream.
    pub fn log(&mut self, time: u64, msg: impl AsRef<str>) {
        self.log.push(format!("T={}: {}", time, msg.as_ref()));
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_order() {
        let mut tracer = Tracer::new();
        tracer.record(0, EventKind::Arrival, Some(1));
        tracer.record(0, EventKind::Exec, Some(1));
        tracer.record(1, EventKind::Idle, None);

        let events = tracer.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, EventKind::Arrival);
        assert_eq!(events[1].kind, EventKind::Exec);
        assert_eq!(events[2].time, 1);
    }

    #[test]
    fn test_event_type_wire_names() {
        let ev = TraceEvent {
            time: 4,
            kind: EventKind::SwitchStart,
            pid: Some(2),
        };
        let json = serde_json::to_string(&ev).unwrap();
        assert_eq!(json, r#"{"time":4,"event_type":"SWITCH_START","pid":2}"#);

        let idle = TraceEvent {
            time: 5,
            kind: EventKind::Idle,
            pid: None,
        };
        let json = serde_json::to_string(&idle).unwrap();
        assert!(!json.contains("pid"));
    }

    #[test]
    fn test_log_lines_are_prefixed() {
        let mut tracer = Tracer::new();
        tracer.log(7, "Process 2 arrived");
        assert_eq!(tracer.log_lines(), &["T=7: Process 2 arrived".to_string()]);
    }
}
