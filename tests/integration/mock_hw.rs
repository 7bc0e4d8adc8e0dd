//! Mock ports for integration tests.
//!
//! Serial, servo and clock share one [`Timeline`] so tests can assert on
//! the interleaving of status lines, servo moves and blocking waits.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use petfeeder::app::events::AppEvent;
use petfeeder::app::ports::{ActuatorPort, CommandPort, EventSink};

// ── Timeline ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trace {
    Line(String),
    Angle(u8),
    /// Blocking wait, in nanoseconds.
    Wait(u64),
}

#[derive(Debug, Clone, Default)]
pub struct Timeline(Rc<RefCell<Vec<Trace>>>);

#[allow(dead_code)]
impl Timeline {
    pub fn record(&self, t: Trace) {
        self.0.borrow_mut().push(t);
    }

    pub fn snapshot(&self) -> Vec<Trace> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Entries recorded after the first `from`.
    pub fn since(&self, from: usize) -> Vec<Trace> {
        self.0.borrow()[from..].to_vec()
    }
}

// ── MockSerial ────────────────────────────────────────────────

pub struct MockSerial {
    pub rx: VecDeque<u8>,
    timeline: Timeline,
}

impl MockSerial {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            rx: VecDeque::new(),
            timeline,
        }
    }

    pub fn send(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }
}

impl CommandPort for MockSerial {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn write_line(&mut self, line: &str) {
        self.timeline.record(Trace::Line(line.to_owned()));
    }
}

// ── MockServo ─────────────────────────────────────────────────

pub struct MockServo {
    angle: Option<u8>,
    timeline: Timeline,
}

impl MockServo {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            angle: None,
            timeline,
        }
    }
}

impl ActuatorPort for MockServo {
    fn set_servo_angle(&mut self, degrees: u8) {
        self.angle = Some(degrees);
        self.timeline.record(Trace::Angle(degrees));
    }

    fn servo_angle(&self) -> Option<u8> {
        self.angle
    }
}

// ── RecordingClock ────────────────────────────────────────────

/// `DelayNs` that returns immediately and logs how long it was asked to wait.
pub struct RecordingClock {
    pub total_ns: u64,
    timeline: Option<Timeline>,
}

#[allow(dead_code)]
impl RecordingClock {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            total_ns: 0,
            timeline: Some(timeline),
        }
    }

    /// A clock that only accumulates.
    pub fn detached() -> Self {
        Self {
            total_ns: 0,
            timeline: None,
        }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for RecordingClock {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        if let Some(t) = &self.timeline {
            t.record(Trace::Wait(u64::from(ns)));
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
