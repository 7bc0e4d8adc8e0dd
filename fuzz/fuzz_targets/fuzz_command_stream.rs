//! Fuzz target: `AppService::poll`
//!
//! Feeds arbitrary serial input to a started feeder and checks the loop
//! invariants: one byte per poll, one cycle per feed byte, and the servo
//! always back at the closed position afterwards.
//!
//! cargo fuzz run fuzz_command_stream

#![no_main]

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use libfuzzer_sys::fuzz_target;
use petfeeder::app::events::AppEvent;
use petfeeder::app::ports::{ActuatorPort, CommandPort, EventSink};
use petfeeder::app::service::{AppService, PollOutcome};
use petfeeder::config::FeederConfig;
use petfeeder::fsm::StateId;

struct Wire(VecDeque<u8>);

impl CommandPort for Wire {
    fn read_byte(&mut self) -> Option<u8> {
        self.0.pop_front()
    }
    fn write_line(&mut self, _line: &str) {}
}

struct Servo(Option<u8>);

impl ActuatorPort for Servo {
    fn set_servo_angle(&mut self, degrees: u8) {
        self.0 = Some(degrees);
    }
    fn servo_angle(&self) -> Option<u8> {
        self.0
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut app = AppService::new(FeederConfig::default());
    let mut wire = Wire(data.iter().copied().collect());
    let mut servo = Servo(None);
    app.start(&mut wire, &mut servo, &mut NoDelay, &mut Discard);

    let mut polls = 0usize;
    while app.poll(&mut wire, &mut servo, &mut NoDelay, &mut Discard) != PollOutcome::Idle {
        polls += 1;
        assert_eq!(wire.0.len(), data.len() - polls, "exactly one byte per poll");
        assert_eq!(app.state(), StateId::Closed);
    }

    let feeds = data.iter().filter(|&&b| b == b'F').count() as u64;
    assert_eq!(app.cycles_completed(), feeds);
    assert_eq!(servo.servo_angle(), Some(0));
});
