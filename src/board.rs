//! Board bring-up: validated config in, ready adapters out.
//!
//! Every init failure funnels into [`crate::error::Error`] so `main` has a
//! single error path.

use log::info;

use crate::adapters::hardware::HardwareAdapter;
use crate::adapters::serial::SerialAdapter;
use crate::config::FeederConfig;
use crate::drivers::hw_init;
use crate::drivers::ledc::LedcPwm;
use crate::drivers::servo::ServoDriver;
use crate::drivers::uart::UartDriver;
use crate::error::Result;
use crate::pins;

/// The feeder's peripherals, behind their ports.
pub struct Board {
    pub serial: SerialAdapter,
    pub hw: HardwareAdapter,
}

impl Board {
    /// Validate `config`, configure the servo PWM and command UART, and
    /// attach the servo.  The servo does not move until the service starts.
    pub fn bring_up(config: &FeederConfig) -> Result<Self> {
        config.validate()?;

        hw_init::init_servo_pwm(config.servo_frequency_hz)?;
        let uart = UartDriver::new(pins::COMMAND_UART_PORT, config.baud_rate)?;
        info!(
            "UART{} command link at {} baud",
            pins::COMMAND_UART_PORT,
            config.baud_rate
        );

        let mut servo = ServoDriver::new(config);
        servo.attach(LedcPwm::new(hw_init::LEDC_CH_SERVO, pins::SERVO_PWM_MAX_DUTY));
        info!("Servo attached on GPIO{}", pins::SERVO_SIGNAL_GPIO);

        Ok(Self {
            serial: SerialAdapter::new(uart),
            hw: HardwareAdapter::new(servo),
        })
    }
}
