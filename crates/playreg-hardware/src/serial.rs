//! Serial-port backed byte stream.
//!
//! Used for the barcode scanner when it is attached through a USB-UART
//! bridge. Reads never block: the port is opened with a zero timeout and a
//! byte is only read after `bytes_to_read` reports one.

use std::fmt;
use std::io::{Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, SerialPort};

use crate::{HardwareError, Result, traits::ByteStream};

pub struct SerialByteStream {
    path: String,
    port: Box<dyn SerialPort>,
}

impl SerialByteStream {
    /// Open `path` as 8N1 at `baud_rate`.
    ///
    /// # Errors
    ///
    /// Returns [`HardwareError::NotAvailable`] if the port cannot be opened.
    pub fn open(path: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(path, baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .timeout(Duration::from_millis(0))
            .open()
            .map_err(|e| HardwareError::not_available(path, e.to_string()))?;

        tracing::info!(port = %path, baud = baud_rate, "Serial port opened");

        Ok(Self {
            path: path.to_string(),
            port,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Debug for SerialByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialByteStream")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl ByteStream for SerialByteStream {
    fn bytes_available(&self) -> usize {
        match self.port.bytes_to_read() {
            Ok(count) => count as usize,
            Err(e) => {
                tracing::warn!(port = %self.path, error = %e, "bytes_to_read failed");
                0
            }
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.bytes_available() == 0 {
            return None;
        }

        let mut byte = [0u8; 1];
        match self.port.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            Ok(_) => None,
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => None,
            Err(e) => {
                tracing::warn!(port = %self.path, error = %e, "Serial read failed");
                None
            }
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.port
            .write_all(bytes)
            .map_err(|e| HardwareError::link(&self.path, format!("write: {e}")))
    }

    fn flush(&mut self) -> Result<()> {
        self.port
            .flush()
            .map_err(|e| HardwareError::link(&self.path, format!("flush: {e}")))
    }

    fn discard_input(&mut self) {
        if let Err(e) = self.port.clear(ClearBuffer::Input) {
            tracing::warn!(port = %self.path, error = %e, "Failed to clear serial input");
        }
    }
}
