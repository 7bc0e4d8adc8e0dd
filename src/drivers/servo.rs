//! Hobby servo driver (position by pulse width).
//!
//! A servo expects one pulse per PWM frame; the pulse width encodes the
//! target angle linearly between `min_pulse_us` (0°) and `max_pulse_us`
//! (180°).  The driver owns any [`SetDutyCycle`] output, so the same code
//! runs on an LEDC channel on target and on a recording mock in tests.
//!
//! There is no position feedback.  `angle()` reports the last command.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::config::{FeederConfig, SERVO_MAX_ANGLE_DEG};
use crate::error::ActuatorError;

pub struct ServoDriver<P> {
    pwm: Option<P>,
    min_pulse_us: u32,
    max_pulse_us: u32,
    period_us: u32,
    angle: Option<u8>,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    /// A detached servo using the pulse range and frame rate from `config`.
    pub fn new(config: &FeederConfig) -> Self {
        Self {
            pwm: None,
            min_pulse_us: u32::from(config.servo_min_pulse_us),
            max_pulse_us: u32::from(config.servo_max_pulse_us),
            period_us: config.servo_period_us(),
            angle: None,
        }
    }

    /// Bind the servo to its signal output.  No pulse is sent until the
    /// first [`write_angle`](Self::write_angle).
    pub fn attach(&mut self, pwm: P) {
        self.pwm = Some(pwm);
    }

    /// Release the output, leaving the line wherever it was.
    pub fn detach(&mut self) -> Option<P> {
        self.pwm.take()
    }

    pub fn is_attached(&self) -> bool {
        self.pwm.is_some()
    }

    /// Pulse width for `degrees`, clamped to the servo's range.
    pub fn pulse_width_us(&self, degrees: u8) -> u32 {
        let deg = u32::from(degrees.min(SERVO_MAX_ANGLE_DEG));
        self.min_pulse_us
            + (self.max_pulse_us - self.min_pulse_us) * deg / u32::from(SERVO_MAX_ANGLE_DEG)
    }

    pub fn write_angle(&mut self, degrees: u8) -> Result<(), ActuatorError> {
        let degrees = degrees.min(SERVO_MAX_ANGLE_DEG);
        let pulse_us = self.pulse_width_us(degrees);
        let period_us = self.period_us;
        let pwm = self.pwm.as_mut().ok_or(ActuatorError::NotAttached)?;

        let duty = u64::from(pulse_us) * u64::from(pwm.max_duty_cycle()) / u64::from(period_us);
        pwm.set_duty_cycle(duty as u16).map_err(|e| {
            warn!("servo: duty write failed: {:?}", e);
            ActuatorError::PwmWriteFailed
        })?;

        self.angle = Some(degrees);
        Ok(())
    }

    /// Last successfully commanded angle.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }
}
