//! Mock device implementations for testing and development.
//!
//! Each mock is returned together with a handle. The device half is owned by
//! the register; the handle stays with the test (or the CLI) to feed input
//! and inspect what the register did.

pub mod audio;
pub mod card_reader;
pub mod stream;
pub mod surface;

pub use audio::{PlayedTone, RecordingAudio, RecordingAudioHandle};
pub use card_reader::{MockCardReader, MockCardReaderHandle};
pub use stream::{MockByteStream, MockByteStreamHandle};
pub use surface::{DrawOp, RecordingSurface, RecordingSurfaceHandle};
