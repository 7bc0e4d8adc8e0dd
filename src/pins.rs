//! GPIO / peripheral pin assignments for the PetFeeder board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.
//!
//! Servo wiring: brown → GND, red → 5 V, orange (signal) → `SERVO_SIGNAL_GPIO`.

// ---------------------------------------------------------------------------
// Feeder servo
// ---------------------------------------------------------------------------

/// PWM signal line to the feeder servo.
pub const SERVO_SIGNAL_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// UART command link (on-board USB-serial bridge)
// ---------------------------------------------------------------------------

/// UART peripheral used for commands and status text.  UART0 is the one
/// wired to the board's USB-serial chip, i.e. the port the host opens.
/// The ESP-IDF console is moved to USB-Serial-JTAG (`sdkconfig.defaults`)
/// so log output stays off this link.
pub const COMMAND_UART_PORT: i32 = 0;
/// `UART_PIN_NO_CHANGE`: keep UART0 on the pins the USB-serial chip uses.
pub const UART_TX_GPIO: i32 = -1;
pub const UART_RX_GPIO: i32 = -1;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  14-bit gives ~1.2 µs steps at 50 Hz.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
/// Largest duty value at [`SERVO_PWM_RESOLUTION_BITS`].
pub const SERVO_PWM_MAX_DUTY: u16 = (1 << SERVO_PWM_RESOLUTION_BITS) - 1;
