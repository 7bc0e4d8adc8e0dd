//! LEDC channel as an `embedded-hal` PWM output.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the duty register via hw_init.
//! On host/test: tracks the duty in-memory only.

use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};

use crate::drivers::hw_init;

/// Raw ESP-IDF error code from a failed duty write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedcError(pub i32);

impl embedded_hal::pwm::Error for LedcError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct LedcPwm {
    channel: u32,
    max_duty: u16,
    duty: u16,
}

impl LedcPwm {
    /// Wrap an already-configured LEDC channel.
    pub fn new(channel: u32, max_duty: u16) -> Self {
        Self {
            channel,
            max_duty,
            duty: 0,
        }
    }

    pub fn current_duty(&self) -> u16 {
        self.duty
    }
}

impl ErrorType for LedcPwm {
    type Error = LedcError;
}

impl SetDutyCycle for LedcPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let duty = duty.min(self.max_duty);
        hw_init::ledc_set(self.channel, duty).map_err(LedcError)?;
        self.duty = duty;
        Ok(())
    }
}
