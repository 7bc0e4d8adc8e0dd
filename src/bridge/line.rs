//! Line reassembly for the feeder's status output.
//!
//! The feeder terminates each status line with `\r\n`.  Bytes arrive in
//! arbitrary chunks, so the decoder accumulates until `\n` and yields the
//! line without its terminator.  `\r` is dropped wherever it appears.
//!
//! Lines longer than [`MAX_LINE_LEN`] are discarded up to the next `\n`;
//! lines that are not valid UTF-8 are discarded; empty lines are skipped.

use heapless::{String, Vec};

/// Longest status line kept.  The feeder's own lines are under 40 bytes.
pub const MAX_LINE_LEN: usize = 128;

pub struct LineDecoder {
    buf: Vec<u8, MAX_LINE_LEN>,
    overflowed: bool,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one byte.  Returns a complete line when `byte` ends one.
    pub fn push(&mut self, byte: u8) -> Option<String<MAX_LINE_LEN>> {
        match byte {
            b'\r' => None,
            b'\n' => {
                let overflowed = core::mem::replace(&mut self.overflowed, false);
                let raw = core::mem::take(&mut self.buf);
                if overflowed || raw.is_empty() {
                    return None;
                }
                let text = core::str::from_utf8(&raw).ok()?;
                let mut line = String::new();
                line.push_str(text).ok()?;
                Some(line)
            }
            _ => {
                if self.buf.push(byte).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }

    /// Bytes held for the line in progress.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    pub fn reset(&mut self) {
        self.buf.clear();
        self.overflowed = false;
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}
