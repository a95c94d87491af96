//! Peripheral abstraction layer for the play register.
//!
//! This crate defines the collaborator traits the register core talks to and
//! ships mock implementations for development and testing:
//!
//! - [`ByteStream`]: debug console and barcode scanner channels
//! - [`CardReader`]: contactless (MFRC522-class) card reader
//! - [`RenderSurface`]: screen drawing primitives
//! - [`AudioSink`]: speaker tones
//! - [`Clock`]: monotonic milliseconds
//!
//! # Polling model
//!
//! The register runs a cooperative tick, so every trait method returns
//! immediately. Traits require `Send` so a host can move the register into
//! a worker task, but nothing is shared between threads.
//!
//! ```
//! use playreg_hardware::mock::MockByteStream;
//! use playreg_hardware::traits::ByteStream;
//!
//! fn drain<S: ByteStream>(stream: &mut S) -> Vec<u8> {
//!     let mut bytes = Vec::new();
//!     while let Some(byte) = stream.read_byte() {
//!         bytes.push(byte);
//!     }
//!     bytes
//! }
//!
//! let (mut stream, handle) = MockByteStream::new();
//! handle.inject_str("4901234567894");
//! assert_eq!(drain(&mut stream).len(), 13);
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return [`Result<T>`][error::Result] with
//! [`HardwareError`]. The register logs these and carries on; none of them
//! abort a tick.
//!
//! [`ByteStream`]: traits::ByteStream
//! [`CardReader`]: traits::CardReader
//! [`RenderSurface`]: traits::RenderSurface
//! [`AudioSink`]: traits::AudioSink
//! [`Clock`]: traits::Clock

pub mod clock;
pub mod devices;
pub mod error;
pub mod mock;
#[cfg(feature = "hardware-serial")]
pub mod serial;
pub mod traits;
pub mod types;

pub use clock::{MockClock, SystemClock};
pub use devices::{AnyByteStream, AnyCardReader};
pub use error::{HardwareError, Result};
pub use traits::{
    AudioSink, ByteStream, CardData, CardReader, Clock, MAX_UID_LENGTH, MIN_UID_LENGTH,
    RenderSurface, play_tone_steps,
};
pub use types::{Color, Font, Rect};
