//! USB-serial link to a feeder, for the host bridge.

use std::io::{self, Read, Write};
use std::time::Duration;

use log::info;
use serialport::SerialPort;

use super::transport::Transport;
use crate::config::BridgeConfig;

/// Read timeout.  Reads only happen after `available()`, so this bounds
/// a device that vanishes mid-read.
pub const READ_TIMEOUT: Duration = Duration::from_millis(50);

pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open `config.port_path` at `config.baud_rate`, 8N1.
    pub fn open(config: &BridgeConfig) -> Result<Self, serialport::Error> {
        let port = serialport::new(config.port_path.as_str(), config.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .timeout(READ_TIMEOUT)
            .open()?;
        info!("Serial: opened {} at {} baud", config.port_path, config.baud_rate);
        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    type Error = io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.port.write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.port.flush()
    }

    fn available(&self) -> bool {
        self.port.bytes_to_read().map(|n| n > 0).unwrap_or(false)
    }
}
