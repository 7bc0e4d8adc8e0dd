//! UART driver for the command link.
//!
//! Non-blocking single-byte reads and line writes.  The receive side is
//! the driver's ring buffer: if the main loop is busy (e.g. holding the
//! feeder open) and the ring fills, further bytes are silently lost.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps the installed `uart_*` driver.
//! On host/test: a fixed-capacity in-memory ring plus a transmit log,
//! fed with [`UartDriver::inject_rx`] and drained with
//! [`UartDriver::take_tx`].

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use heapless::Deque;

use crate::drivers::hw_init;
use crate::error::CommsError;

pub struct UartDriver {
    port: i32,
    #[cfg(not(target_os = "espidf"))]
    rx: Deque<u8, { hw_init::UART_RX_RING_SIZE }>,
    #[cfg(not(target_os = "espidf"))]
    tx: Vec<u8>,
    #[cfg(not(target_os = "espidf"))]
    dropped: usize,
}

impl UartDriver {
    /// Install the driver on `port` at `baud_rate`, 8N1.
    pub fn new(port: i32, baud_rate: u32) -> Result<Self, CommsError> {
        hw_init::init_uart(port, baud_rate).map_err(|e| {
            log::warn!("uart: {}", e);
            match e {
                hw_init::HwInitError::UartInstallFailed(rc)
                | hw_init::HwInitError::UartConfigFailed(rc) => CommsError::UartInitFailed(rc),
                _ => CommsError::UartInitFailed(-1),
            }
        })?;

        Ok(Self {
            port,
            #[cfg(not(target_os = "espidf"))]
            rx: Deque::new(),
            #[cfg(not(target_os = "espidf"))]
            tx: Vec::new(),
            #[cfg(not(target_os = "espidf"))]
            dropped: 0,
        })
    }

    pub fn port(&self) -> i32 {
        self.port
    }

    /// Take one byte if any is buffered.  Never blocks.
    #[cfg(target_os = "espidf")]
    pub fn read_byte(&mut self) -> Result<Option<u8>, CommsError> {
        let mut byte = 0u8;
        // SAFETY: the driver was installed in new(); `byte` outlives the call
        // and has room for the single byte requested.  Zero ticks to wait.
        let n = unsafe {
            uart_read_bytes(self.port, (&raw mut byte).cast(), 1, 0)
        };
        match n {
            1 => Ok(Some(byte)),
            0 => Ok(None),
            _ => Err(CommsError::UartReadFailed),
        }
    }

    /// Take one byte if any is buffered.  Never blocks.
    #[cfg(not(target_os = "espidf"))]
    pub fn read_byte(&mut self) -> Result<Option<u8>, CommsError> {
        Ok(self.rx.pop_front())
    }

    /// Queue `data` for transmission.  Returns the number of bytes queued.
    #[cfg(target_os = "espidf")]
    pub fn write(&mut self, data: &[u8]) -> Result<usize, CommsError> {
        // SAFETY: the driver was installed in new(); `data` is valid for
        // `data.len()` bytes for the duration of the call.
        let n = unsafe { uart_write_bytes(self.port, data.as_ptr().cast(), data.len()) };
        if n < 0 {
            return Err(CommsError::UartWriteFailed);
        }
        Ok(n as usize)
    }

    /// Queue `data` for transmission.  Returns the number of bytes queued.
    #[cfg(not(target_os = "espidf"))]
    pub fn write(&mut self, data: &[u8]) -> Result<usize, CommsError> {
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }

    // ── Simulation hooks ──────────────────────────────────────

    /// Deliver bytes as if they arrived on the wire.  Bytes that do not
    /// fit in the receive ring are dropped.  Returns how many were kept.
    #[cfg(not(target_os = "espidf"))]
    pub fn inject_rx(&mut self, bytes: &[u8]) -> usize {
        let mut kept = 0;
        for &b in bytes {
            if self.rx.push_back(b).is_ok() {
                kept += 1;
            } else {
                self.dropped += 1;
            }
        }
        kept
    }

    /// Everything written since the last call.
    #[cfg(not(target_os = "espidf"))]
    pub fn take_tx(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.tx)
    }

    /// Bytes buffered and not yet read.
    #[cfg(not(target_os = "espidf"))]
    pub fn rx_pending(&self) -> usize {
        self.rx.len()
    }

    /// Bytes lost to a full receive ring since startup.
    #[cfg(not(target_os = "espidf"))]
    pub fn dropped_bytes(&self) -> usize {
        self.dropped
    }
}
