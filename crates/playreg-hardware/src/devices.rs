//! Enum wrappers for device dispatch.
//!
//! The register is generic over its peripherals. These enums let a host pick
//! a backend at runtime (mock or real serial port) while keeping a single
//! concrete type for the register to be generic over.
//!
//! # Examples
//!
//! ```
//! use playreg_hardware::devices::AnyByteStream;
//! use playreg_hardware::mock::MockByteStream;
//! use playreg_hardware::traits::ByteStream;
//!
//! let (stream, handle) = MockByteStream::new();
//! let mut any_stream = AnyByteStream::Mock(stream);
//!
//! handle.inject(b"A");
//! assert_eq!(any_stream.read_byte(), Some(b'A'));
//! ```

use crate::Result;
use crate::mock::{MockByteStream, MockCardReader};
use crate::traits::{ByteStream, CardData, CardReader};

#[cfg(feature = "hardware-serial")]
use crate::serial::SerialByteStream;

/// Enum wrapper for byte stream dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyByteStream {
    /// Channel-backed stream for development and testing.
    Mock(MockByteStream),

    /// Real serial port (requires the `hardware-serial` feature).
    #[cfg(feature = "hardware-serial")]
    Serial(SerialByteStream),
}

impl ByteStream for AnyByteStream {
    fn bytes_available(&self) -> usize {
        match self {
            Self::Mock(stream) => stream.bytes_available(),
            #[cfg(feature = "hardware-serial")]
            Self::Serial(stream) => stream.bytes_available(),
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        match self {
            Self::Mock(stream) => stream.read_byte(),
            #[cfg(feature = "hardware-serial")]
            Self::Serial(stream) => stream.read_byte(),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        match self {
            Self::Mock(stream) => stream.write_all(bytes),
            #[cfg(feature = "hardware-serial")]
            Self::Serial(stream) => stream.write_all(bytes),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            Self::Mock(stream) => stream.flush(),
            #[cfg(feature = "hardware-serial")]
            Self::Serial(stream) => stream.flush(),
        }
    }

    fn discard_input(&mut self) {
        match self {
            Self::Mock(stream) => stream.discard_input(),
            #[cfg(feature = "hardware-serial")]
            Self::Serial(stream) => stream.discard_input(),
        }
    }
}

/// Enum wrapper for card reader dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyCardReader {
    /// Mock reader for development and testing.
    Mock(MockCardReader),
}

impl CardReader for AnyCardReader {
    fn detect(&mut self) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.detect(),
        }
    }

    fn init(&mut self) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.init(),
        }
    }

    fn version(&mut self) -> Result<u8> {
        match self {
            Self::Mock(reader) => reader.version(),
        }
    }

    fn is_new_card_present(&mut self) -> bool {
        match self {
            Self::Mock(reader) => reader.is_new_card_present(),
        }
    }

    fn read_card_serial(&mut self) -> Result<Option<CardData>> {
        match self {
            Self::Mock(reader) => reader.read_card_serial(),
        }
    }

    fn halt(&mut self) {
        match self {
            Self::Mock(reader) => reader.halt(),
        }
    }

    fn stop_crypto(&mut self) {
        match self {
            Self::Mock(reader) => reader.stop_crypto(),
        }
    }
}
