//! Hardware adapter — bridges the servo driver to the actuator port.
//!
//! The only module in the system that commands the actuator.  A failed
//! PWM write is logged and dropped: the feeder has no fault reporting,
//! so the caller never sees it.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::ActuatorPort;
use crate::drivers::ledc::LedcPwm;
use crate::drivers::servo::ServoDriver;

/// Concrete adapter that puts the feeder servo behind [`ActuatorPort`].
pub struct HardwareAdapter<P = LedcPwm> {
    servo: ServoDriver<P>,
}

impl<P: SetDutyCycle> HardwareAdapter<P> {
    pub fn new(servo: ServoDriver<P>) -> Self {
        Self { servo }
    }

    pub fn servo(&self) -> &ServoDriver<P> {
        &self.servo
    }
}

impl<P: SetDutyCycle> ActuatorPort for HardwareAdapter<P> {
    fn set_servo_angle(&mut self, degrees: u8) {
        if let Err(e) = self.servo.write_angle(degrees) {
            warn!("servo: move to {}° failed: {}", degrees, e);
        }
    }

    fn servo_angle(&self) -> Option<u8> {
        self.servo.angle()
    }
}
