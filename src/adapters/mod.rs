//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements     | Connects to                  |
//! |------------|----------------|------------------------------|
//! | `hardware` | ActuatorPort   | Servo on an LEDC PWM channel |
//! | `serial`   | CommandPort    | UART command link            |
//! | `log_sink` | EventSink      | Log output                   |
//! | `time`     | DelayNs        | FreeRTOS delay / host sleep  |

pub mod hardware;
pub mod log_sink;
pub mod serial;
pub mod time;
