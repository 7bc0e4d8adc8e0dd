//! Byte link between the bridge and the feeder.
//!
//! In production this is the USB-serial device named by
//! `BridgeConfig::port_path`; tests plug in a scripted link or the
//! simulated firmware itself.

/// Non-blocking byte channel to the feeder.
pub trait Transport {
    type Error: core::fmt::Debug;

    /// Copy whatever has arrived into `buf`; `Ok(0)` when nothing is waiting.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Queue `data` for sending.  Returns how many bytes were accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Push queued bytes onto the wire.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Whether a `read` would return data right now.
    fn available(&self) -> bool;
}

/// Link with nothing on the other end: accepts every write, never reads.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl Transport for NullTransport {
    type Error = core::convert::Infallible;

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn available(&self) -> bool {
        false
    }
}
