//! Actuator and serial drivers, hardware initialisation.

pub mod hw_init;
pub mod ledc;
pub mod servo;
pub mod uart;
