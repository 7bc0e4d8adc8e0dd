//! Integration tests for the AppService → FSM → ports pipeline.
//!
//! These run on the host (x86_64) and verify the observable behaviour of
//! the feeder loop: what goes out on the serial line, where the servo is
//! commanded, and how long the loop blocks, all in order.

use crate::mock_hw::{MockSerial, MockServo, RecordingClock, RecordingSink, Timeline, Trace};

use petfeeder::adapters::hardware::HardwareAdapter;
use petfeeder::adapters::serial::SerialAdapter;
use petfeeder::app::events::{AppEvent, StatusLine};
use petfeeder::app::ports::ActuatorPort;
use petfeeder::app::service::{AppService, PollOutcome};
use petfeeder::config::FeederConfig;
use petfeeder::drivers::ledc::LedcPwm;
use petfeeder::drivers::servo::ServoDriver;
use petfeeder::drivers::uart::UartDriver;
use petfeeder::fsm::StateId;
use petfeeder::pins;

const SECOND_NS: u64 = 1_000_000_000;

struct Rig {
    app: AppService,
    serial: MockSerial,
    servo: MockServo,
    clock: RecordingClock,
    sink: RecordingSink,
    timeline: Timeline,
}

impl Rig {
    fn new() -> Self {
        let timeline = Timeline::default();
        Self {
            app: AppService::new(FeederConfig::default()),
            serial: MockSerial::new(timeline.clone()),
            servo: MockServo::new(timeline.clone()),
            clock: RecordingClock::new(timeline.clone()),
            sink: RecordingSink::default(),
            timeline,
        }
    }

    fn started() -> Self {
        let mut rig = Self::new();
        rig.start();
        rig
    }

    fn start(&mut self) {
        self.app.start(
            &mut self.serial,
            &mut self.servo,
            &mut self.clock,
            &mut self.sink,
        );
    }

    fn poll(&mut self) -> PollOutcome {
        self.app.poll(
            &mut self.serial,
            &mut self.servo,
            &mut self.clock,
            &mut self.sink,
        )
    }
}

/// Merge adjacent waits so assertions do not depend on how a delay is
/// split into `delay_ns` calls.
fn coalesce(trace: Vec<Trace>) -> Vec<Trace> {
    let mut out: Vec<Trace> = Vec::new();
    for t in trace {
        if let (Trace::Wait(ns), Some(Trace::Wait(acc))) = (&t, out.last_mut()) {
            *acc += ns;
            continue;
        }
        out.push(t);
    }
    out
}

fn line(s: StatusLine) -> Trace {
    Trace::Line(s.as_str().to_owned())
}

fn feed_cycle() -> Vec<Trace> {
    vec![
        line(StatusLine::Dispensing),
        Trace::Angle(90),
        Trace::Wait(SECOND_NS),
        Trace::Angle(0),
        line(StatusLine::FeedComplete),
    ]
}

// ── Startup ──────────────────────────────────────────────────

#[test]
fn startup_announces_closes_then_settles() {
    let mut rig = Rig::new();
    rig.start();

    assert_eq!(
        coalesce(rig.timeline.snapshot()),
        vec![line(StatusLine::Ready), Trace::Angle(0), Trace::Wait(SECOND_NS)]
    );
    assert_eq!(rig.app.state(), StateId::Closed);
    assert_eq!(rig.servo.servo_angle(), Some(0));
}

#[test]
fn no_input_is_read_during_startup() {
    let mut rig = Rig::new();
    rig.serial.send(b"F");
    rig.start();

    assert_eq!(rig.serial.rx.len(), 1, "startup must not consume input");
    assert_eq!(rig.app.cycles_completed(), 0);
}

#[test]
fn startup_emits_started_event() {
    let rig = Rig::started();
    assert_eq!(
        rig.sink.events,
        vec![AppEvent::Started {
            state: StateId::Closed,
            angle_deg: 0
        }]
    );
}

// ── Idle behaviour ───────────────────────────────────────────

#[test]
fn empty_line_is_idle_and_silent() {
    let mut rig = Rig::started();
    let mark = rig.timeline.len();

    assert_eq!(rig.poll(), PollOutcome::Idle);
    assert!(rig.timeline.since(mark).is_empty());
}

#[test]
fn every_non_feed_byte_is_a_no_op() {
    let mut rig = Rig::started();
    let mark = rig.timeline.len();

    for b in (0u8..=255).filter(|&b| b != b'F') {
        rig.serial.send(&[b]);
        assert_eq!(rig.poll(), PollOutcome::Ignored(b));
        assert_eq!(rig.app.state(), StateId::Closed);
    }

    assert!(
        rig.timeline.since(mark).is_empty(),
        "ignored bytes must not move the servo, write or wait"
    );
    assert_eq!(rig.servo.servo_angle(), Some(0));
    assert_eq!(rig.app.cycles_completed(), 0);
}

#[test]
fn lowercase_f_is_not_a_command() {
    let mut rig = Rig::started();
    rig.serial.send(b"f");
    assert_eq!(rig.poll(), PollOutcome::Ignored(b'f'));
}

// ── Dispense cycle ───────────────────────────────────────────

#[test]
fn feed_runs_open_hold_close_in_order() {
    let mut rig = Rig::started();
    let mark = rig.timeline.len();

    rig.serial.send(b"F");
    assert_eq!(rig.poll(), PollOutcome::Dispensed);

    assert_eq!(coalesce(rig.timeline.since(mark)), feed_cycle());
    assert_eq!(rig.app.state(), StateId::Closed);
    assert_eq!(rig.app.cycles_completed(), 1);
}

#[test]
fn servo_is_held_open_at_least_one_second() {
    let mut rig = Rig::started();
    let mark = rig.timeline.len();
    rig.serial.send(b"F");
    rig.poll();

    let trace = rig.timeline.since(mark);
    let open = trace.iter().position(|t| *t == Trace::Angle(90)).unwrap();
    let close = trace.iter().position(|t| *t == Trace::Angle(0)).unwrap();
    let held: u64 = trace[open..close]
        .iter()
        .map(|t| match t {
            Trace::Wait(ns) => *ns,
            _ => 0,
        })
        .sum();
    assert!(held >= SECOND_NS, "held open for only {held} ns");
}

#[test]
fn two_feeds_run_two_independent_cycles() {
    let mut rig = Rig::started();
    let mark = rig.timeline.len();

    rig.serial.send(b"FF");
    assert_eq!(rig.poll(), PollOutcome::Dispensed);
    assert_eq!(rig.poll(), PollOutcome::Dispensed);
    assert_eq!(rig.poll(), PollOutcome::Idle);

    let mut expected = feed_cycle();
    expected.extend(feed_cycle());
    assert_eq!(coalesce(rig.timeline.since(mark)), expected);
    assert_eq!(rig.app.cycles_completed(), 2);
}

#[test]
fn one_byte_per_poll() {
    let mut rig = Rig::started();
    let mark = rig.timeline.len();
    rig.serial.send(b"XF");

    assert_eq!(rig.poll(), PollOutcome::Ignored(b'X'));
    assert!(rig.timeline.since(mark).is_empty());
    assert_eq!(rig.serial.rx.len(), 1);

    assert_eq!(rig.poll(), PollOutcome::Dispensed);
    assert_eq!(coalesce(rig.timeline.since(mark)), feed_cycle());
}

#[test]
fn bytes_sent_during_a_cycle_wait_their_turn() {
    let mut rig = Rig::started();
    rig.serial.send(b"FxF");

    assert_eq!(rig.poll(), PollOutcome::Dispensed);
    assert_eq!(rig.serial.rx.len(), 2, "cycle must consume only its own byte");
    assert_eq!(rig.poll(), PollOutcome::Ignored(b'x'));
    assert_eq!(rig.poll(), PollOutcome::Dispensed);
    assert_eq!(rig.app.cycles_completed(), 2);
}

#[test]
fn cycle_emits_transitions_and_count() {
    let mut rig = Rig::started();
    rig.sink.events.clear();
    rig.serial.send(b"F");
    rig.poll();

    assert_eq!(
        rig.sink.events,
        vec![
            AppEvent::StateChanged {
                from: StateId::Closed,
                to: StateId::Open
            },
            AppEvent::StateChanged {
                from: StateId::Open,
                to: StateId::Closed
            },
            AppEvent::CycleCompleted { cycles: 1 },
        ]
    );
}

// ── Full stack: UART + servo driver ──────────────────────────

#[test]
fn uart_and_servo_adapters_carry_a_full_cycle() {
    let config = FeederConfig::default();
    let mut servo = ServoDriver::new(&config);
    servo.attach(LedcPwm::new(0, pins::SERVO_PWM_MAX_DUTY));

    let mut serial = SerialAdapter::new(UartDriver::new(pins::COMMAND_UART_PORT, 9600).unwrap());
    let mut hw = HardwareAdapter::new(servo);
    let mut clock = RecordingClock::detached();
    let mut sink = RecordingSink::default();
    let mut app = AppService::new(config);

    serial.uart_mut().inject_rx(b"F");
    app.start(&mut serial, &mut hw, &mut clock, &mut sink);
    assert_eq!(app.poll(&mut serial, &mut hw, &mut clock, &mut sink), PollOutcome::Dispensed);

    let tx = serial.uart_mut().take_tx();
    assert_eq!(
        tx,
        b"Feeder Ready. Sending test pulse...\r\nDispensing Food...\r\nFeed Complete.\r\n"
    );
    assert_eq!(hw.servo_angle(), Some(0));
    assert_eq!(clock.total_ms(), 2000);
}
