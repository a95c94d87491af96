//! Input framing for the play register.
//!
//! Bytes from the debug console and the barcode scanner flow through:
//!
//! ```text
//! ByteStream -> FrameReader -> ControlFilter -> CodeNormalizer -> register
//!                          \-> DebugCommand (console only)
//! ```

pub mod classifier;
pub mod commands;
pub mod debug;
pub mod frame_reader;
pub mod normalizer;

pub use classifier::{ControlFilter, FrameKind};
pub use commands::{BOOT_SEQUENCE, ScannerCommand};
pub use debug::DebugCommand;
pub use frame_reader::FrameReader;
pub use normalizer::{CodeNormalizer, normalize};
