//! Serial adapter — the UART command link behind [`CommandPort`].
//!
//! Status lines go out `\r\n`-terminated, the same framing a host
//! readline parser expects.  Read and write failures are logged and
//! otherwise treated as "nothing happened".

use log::warn;

use crate::app::ports::CommandPort;
use crate::drivers::uart::UartDriver;

pub const LINE_TERMINATOR: &[u8] = b"\r\n";

pub struct SerialAdapter {
    uart: UartDriver,
}

impl SerialAdapter {
    pub fn new(uart: UartDriver) -> Self {
        Self { uart }
    }

    pub fn uart(&self) -> &UartDriver {
        &self.uart
    }

    pub fn uart_mut(&mut self) -> &mut UartDriver {
        &mut self.uart
    }
}

impl CommandPort for SerialAdapter {
    fn read_byte(&mut self) -> Option<u8> {
        match self.uart.read_byte() {
            Ok(b) => b,
            Err(e) => {
                warn!("serial: {}", e);
                None
            }
        }
    }

    fn write_line(&mut self, line: &str) {
        let result = self
            .uart
            .write(line.as_bytes())
            .and_then(|_| self.uart.write(LINE_TERMINATOR));
        if let Err(e) = result {
            warn!("serial: dropped status line '{}': {}", line, e);
        }
    }
}
