//! Bridge ⇄ firmware loopback.
//!
//! Runs the real `AppService` behind the simulated UART and plugs it into
//! a `FeedBridge` as its transport, so queued commands travel the whole
//! path: queue → bridge → 'F' → feeder → "Feed Complete." → queue.

use std::collections::VecDeque;

use crate::mock_hw::{RecordingClock, RecordingSink};

use petfeeder::adapters::hardware::HardwareAdapter;
use petfeeder::adapters::serial::SerialAdapter;
use petfeeder::adapters::time::Esp32TimeAdapter;
use petfeeder::app::ports::ActuatorPort;
use petfeeder::app::service::{AppService, PollOutcome};
use petfeeder::bridge::queue::{CommandQueue, CommandStatus, MemoryQueue};
use petfeeder::bridge::transport::Transport;
use petfeeder::bridge::FeedBridge;
use petfeeder::config::{BridgeConfig, FeederConfig};
use petfeeder::drivers::ledc::LedcPwm;
use petfeeder::drivers::servo::ServoDriver;
use petfeeder::drivers::uart::UartDriver;
use petfeeder::error::CommsError;
use petfeeder::pins;

/// The feeder, seen from the far end of its serial cable.
struct SimFeeder {
    app: AppService,
    serial: SerialAdapter,
    hw: HardwareAdapter,
    clock: RecordingClock,
    sink: RecordingSink,
    outbox: VecDeque<u8>,
}

impl SimFeeder {
    fn boot() -> Self {
        let config = FeederConfig::default();
        let mut servo = ServoDriver::new(&config);
        servo.attach(LedcPwm::new(0, pins::SERVO_PWM_MAX_DUTY));

        let mut feeder = Self {
            serial: SerialAdapter::new(
                UartDriver::new(pins::COMMAND_UART_PORT, config.baud_rate).unwrap(),
            ),
            hw: HardwareAdapter::new(servo),
            clock: RecordingClock::detached(),
            sink: RecordingSink::default(),
            outbox: VecDeque::new(),
            app: AppService::new(config),
        };
        feeder.app.start(
            &mut feeder.serial,
            &mut feeder.hw,
            &mut feeder.clock,
            &mut feeder.sink,
        );
        feeder.collect_output();
        feeder
    }

    /// Let the loop run until it has nothing left to read.
    fn run_until_idle(&mut self) {
        while self.app.poll(
            &mut self.serial,
            &mut self.hw,
            &mut self.clock,
            &mut self.sink,
        ) != PollOutcome::Idle
        {}
        self.collect_output();
    }

    fn collect_output(&mut self) {
        self.outbox.extend(self.serial.uart_mut().take_tx());
    }
}

impl Transport for SimFeeder {
    type Error = CommsError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.outbox.len());
        for (slot, b) in buf.iter_mut().zip(self.outbox.drain(..n)) {
            *slot = b;
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        let kept = self.serial.uart_mut().inject_rx(data);
        Ok(kept)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.run_until_idle();
        Ok(())
    }

    fn available(&self) -> bool {
        !self.outbox.is_empty()
    }
}

fn bridge_with(queue: MemoryQueue) -> FeedBridge<SimFeeder, MemoryQueue> {
    FeedBridge::new(SimFeeder::boot(), queue, BridgeConfig::default())
}

#[test]
fn backlog_command_is_fed_and_confirmed() {
    let clock = Esp32TimeAdapter::new();
    let mut queue = MemoryQueue::new();
    let cmd = queue.push_pending("FEED_NOW");
    let mut bridge = bridge_with(queue);

    assert_eq!(bridge.on_subscribed(), Ok(Some(cmd.id)));
    let now = clock.uptime_ms();
    // Ready banner, Dispensing, Feed Complete.
    assert_eq!(bridge.poll(now), Ok(3));

    let stored = bridge.queue().get(cmd.id).unwrap();
    assert_eq!(stored.status, CommandStatus::Executed);
    assert_eq!(stored.executed_at_ms, Some(now));
    assert_eq!(bridge.current(), None);
    assert_eq!(bridge.transport_mut().app.cycles_completed(), 1);
    assert_eq!(bridge.transport_mut().hw.servo_angle(), Some(0));
}

#[test]
fn ready_banner_alone_confirms_nothing() {
    let mut queue = MemoryQueue::new();
    queue.push_pending("FEED_NOW");
    let mut bridge = bridge_with(queue);

    assert_eq!(bridge.poll(0), Ok(1));
    assert_eq!(bridge.queue().pending().len(), 1);
}

#[test]
fn inserted_commands_complete_in_order() {
    let mut bridge = bridge_with(MemoryQueue::new());
    bridge.poll(0).unwrap();

    let a = bridge.queue_mut().push_pending("FEED_NOW");
    let b = bridge.queue_mut().push_pending("SCHEDULED");
    bridge.on_command_inserted(&a).unwrap();
    bridge.on_command_inserted(&b).unwrap();

    assert_eq!(bridge.poll(42), Ok(4));
    assert!(bridge.queue().pending().is_empty());
    assert_eq!(bridge.queue().get(a.id).unwrap().executed_at_ms, Some(42));
    assert_eq!(bridge.queue().get(b.id).unwrap().executed_at_ms, Some(42));
    assert_eq!(bridge.transport_mut().app.cycles_completed(), 2);
}
