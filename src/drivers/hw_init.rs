//! One-shot hardware peripheral initialization.
//!
//! Configures the LEDC timer/channel for the servo and installs the UART
//! driver for the command link, using raw ESP-IDF sys calls. Called once
//! from `main()` before the control loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    LedcTimerFailed(i32),
    LedcChannelFailed(i32),
    UartInstallFailed(i32),
    UartConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LedcTimerFailed(rc)   => write!(f, "LEDC timer config failed (rc={})", rc),
            Self::LedcChannelFailed(rc) => write!(f, "LEDC channel config failed (rc={})", rc),
            Self::UartInstallFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
            Self::UartConfigFailed(rc)  => write!(f, "UART param/pin config failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

impl From<HwInitError> for crate::error::Error {
    fn from(_: HwInitError) -> Self {
        Self::Init("peripheral initialisation failed")
    }
}

/// LEDC channel carrying the servo signal.
pub const LEDC_CH_SERVO: u32 = 0;

/// Size of the UART driver's receive ring.  Bytes arriving while it is
/// full are lost; nothing upstream is told.
pub const UART_RX_RING_SIZE: usize = 256;

// ── LEDC PWM (servo) ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_servo_pwm(frequency_hz: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        let timer = ledc_timer_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            timer_num: ledc_timer_t_LEDC_TIMER_0,
            duty_resolution: ledc_timer_bit_t_LEDC_TIMER_14_BIT,
            freq_hz: frequency_hz,
            clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
            ..Default::default()
        };
        let ret = ledc_timer_config(&timer);
        if ret != ESP_OK as i32 { return Err(HwInitError::LedcTimerFailed(ret)); }

        let ret = ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: LEDC_CH_SERVO,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: pins::SERVO_SIGNAL_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        });
        if ret != ESP_OK as i32 { return Err(HwInitError::LedcChannelFailed(ret)); }
    }
    info!(
        "hw_init: LEDC servo channel on GPIO {} ({} Hz, {}-bit)",
        pins::SERVO_SIGNAL_GPIO, frequency_hz, pins::SERVO_PWM_RESOLUTION_BITS
    );
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_servo_pwm(frequency_hz: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): servo PWM at {} Hz skipped", frequency_hz);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u16) -> Result<(), i32> {
    // SAFETY: the channel was configured in init_servo_pwm(); duty register
    // writes are race-free since only the main loop calls this function.
    unsafe {
        let ret = ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, u32::from(duty));
        if ret != ESP_OK as i32 { return Err(ret); }
        let ret = ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
        if ret != ESP_OK as i32 { return Err(ret); }
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u16) -> Result<(), i32> {
    Ok(())
}

// ── UART (command link) ───────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_uart(port: i32, baud_rate: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; the port is
    // not touched by anything else (the console is on USB-Serial-JTAG).
    unsafe {
        let ret = uart_driver_install(
            port,
            UART_RX_RING_SIZE as i32,
            0,
            0,
            core::ptr::null_mut(),
            0,
        );
        if ret != ESP_OK as i32 { return Err(HwInitError::UartInstallFailed(ret)); }

        let cfg = uart_config_t {
            baud_rate: baud_rate as i32,
            data_bits: uart_word_length_t_UART_DATA_8_BITS,
            parity: uart_parity_t_UART_PARITY_DISABLE,
            stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
            flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
            ..Default::default()
        };
        let ret = uart_param_config(port, &cfg);
        if ret != ESP_OK as i32 { return Err(HwInitError::UartConfigFailed(ret)); }

        let ret = uart_set_pin(port, pins::UART_TX_GPIO, pins::UART_RX_GPIO, -1, -1);
        if ret != ESP_OK as i32 { return Err(HwInitError::UartConfigFailed(ret)); }
    }
    info!("hw_init: UART{} at {} baud (8N1)", port, baud_rate);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_uart(port: i32, baud_rate: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): UART{} at {} baud skipped", port, baud_rate);
    Ok(())
}
