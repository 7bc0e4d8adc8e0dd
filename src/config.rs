//! System configuration parameters
//!
//! All tunable parameters for the feeder and its host-side bridge.
//! The firmware runs on the compiled-in defaults; JSON loading exists for
//! host tooling and simulation.

use serde::{Deserialize, Serialize};

/// Largest angle a hobby servo accepts.
pub const SERVO_MAX_ANGLE_DEG: u8 = 180;

/// Feeder firmware configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeederConfig {
    // --- Serial ---
    /// UART line speed
    pub baud_rate: u32,
    /// Byte that triggers a dispense cycle
    pub feed_command: u8,

    // --- Servo positions ---
    /// Angle for the closed (resting) position
    pub closed_angle_deg: u8,
    /// Angle for the open (dispensing) position
    pub open_angle_deg: u8,

    // --- Timing ---
    /// How long the feeder stays open per cycle (milliseconds)
    pub hold_open_ms: u32,
    /// Settling delay after the startup move to closed (milliseconds)
    pub settle_ms: u32,

    // --- Servo signal ---
    /// Pulse width at 0 degrees (microseconds)
    pub servo_min_pulse_us: u16,
    /// Pulse width at 180 degrees (microseconds)
    pub servo_max_pulse_us: u16,
    /// PWM frame rate (Hz)
    pub servo_frequency_hz: u32,
}

impl Default for FeederConfig {
    fn default() -> Self {
        Self {
            // Serial
            baud_rate: 9600,
            feed_command: b'F',

            // Positions
            closed_angle_deg: 0,
            open_angle_deg: 90,

            // Timing
            hold_open_ms: 1000,
            settle_ms: 1000,

            // Servo signal (standard hobby-servo range)
            servo_min_pulse_us: 544,
            servo_max_pulse_us: 2400,
            servo_frequency_hz: 50, // 20 ms frame
        }
    }
}

impl FeederConfig {
    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.baud_rate == 0 {
            return Err(ConfigError::ValidationFailed("baud_rate must be non-zero"));
        }
        if self.closed_angle_deg > SERVO_MAX_ANGLE_DEG {
            return Err(ConfigError::ValidationFailed(
                "closed_angle_deg must be 0–180",
            ));
        }
        if self.open_angle_deg > SERVO_MAX_ANGLE_DEG {
            return Err(ConfigError::ValidationFailed("open_angle_deg must be 0–180"));
        }
        if !(1..=400).contains(&self.servo_frequency_hz) {
            return Err(ConfigError::ValidationFailed(
                "servo_frequency_hz must be 1–400",
            ));
        }
        if self.servo_min_pulse_us >= self.servo_max_pulse_us {
            return Err(ConfigError::ValidationFailed(
                "servo_min_pulse_us must be below servo_max_pulse_us",
            ));
        }
        if u32::from(self.servo_max_pulse_us) >= self.servo_period_us() {
            return Err(ConfigError::ValidationFailed(
                "servo_max_pulse_us must fit in one PWM period",
            ));
        }
        Ok(())
    }

    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Length of one PWM frame in microseconds.
    pub fn servo_period_us(&self) -> u32 {
        1_000_000 / self.servo_frequency_hz.max(1)
    }
}

/// Host bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Serial device the feeder is attached to
    pub port_path: String,
    /// Must match the firmware's `baud_rate`
    pub baud_rate: u32,
    /// Byte written to the feeder for each queued command
    pub command_byte: u8,
    /// Substring of the feeder status line that marks a finished cycle
    pub complete_marker: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            port_path: "/dev/cu.usbserial-110".into(),
            baud_rate: 9600,
            command_byte: b'F',
            complete_marker: "Feed Complete".into(),
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port_path.is_empty() {
            return Err(ConfigError::ValidationFailed("port_path must not be empty"));
        }
        if self.baud_rate == 0 {
            return Err(ConfigError::ValidationFailed("baud_rate must be non-zero"));
        }
        if self.complete_marker.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "complete_marker must not be empty",
            ));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Errors from configuration parsing and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON for this struct.
    Malformed,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed config document"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Malformed => Self::Config("malformed config document"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}
