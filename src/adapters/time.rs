//! ESP32 time adapters.
//!
//! - [`Esp32Delay`] — blocking waits for the control loop, as an
//!   [`embedded_hal::delay::DelayNs`].
//! - [`Esp32TimeAdapter`] — monotonic uptime.
//!
//! **`target_os = "espidf"`** uses the FreeRTOS delay and
//! `esp_timer_get_time()`; other targets use `std::thread::sleep` and
//! `std::time::Instant` for host-side simulation.

use embedded_hal::delay::DelayNs;

/// Blocking delay provider.  Yields to FreeRTOS on target so the idle
/// task keeps running while the feeder is held open.
#[derive(Debug, Default, Clone, Copy)]
pub struct Esp32Delay;

impl Esp32Delay {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
impl DelayNs for Esp32Delay {
    fn delay_ns(&mut self, ns: u32) {
        esp_idf_hal::delay::FreeRtos.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for Esp32Delay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

/// Monotonic clock for the ESP32-S3 platform.
pub struct Esp32TimeAdapter {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32TimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32TimeAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot (monotonic, wraps at `u64::MAX`).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since boot (monotonic, wraps at `u64::MAX`).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    /// Milliseconds since boot.
    pub fn uptime_ms(&self) -> u64 {
        self.uptime_us() / 1000
    }
}
