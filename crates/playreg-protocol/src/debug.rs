//! Debug console line protocol.
//!
//! Lines typed on the debug console drive the register without hardware:
//!
//! ```text
//! BC:<code>     inject a scanned barcode
//! RFID:<uid>    inject a card UID
//! ```
//!
//! The line is trimmed before the prefix check and the remainder is passed
//! on untouched; the register normalizes it like real device input. Lines
//! with any other prefix are ignored.

use std::fmt;

use playreg_core::constants::{DEBUG_BARCODE_PREFIX, DEBUG_CARD_PREFIX};

/// A parsed debug console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugCommand<'a> {
    /// `BC:` line; the payload is a raw barcode.
    Barcode(&'a str),
    /// `RFID:` line; the payload is a raw card UID.
    CardUid(&'a str),
}

impl<'a> DebugCommand<'a> {
    /// Parse one console line.
    ///
    /// ```
    /// use playreg_protocol::DebugCommand;
    ///
    /// assert_eq!(DebugCommand::parse("  BC:ABC123 "), Some(DebugCommand::Barcode("ABC123")));
    /// assert_eq!(DebugCommand::parse("RFID:DEADBEEF"), Some(DebugCommand::CardUid("DEADBEEF")));
    /// assert_eq!(DebugCommand::parse("hello"), None);
    /// ```
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();

        if let Some(code) = line.strip_prefix(DEBUG_BARCODE_PREFIX) {
            return Some(Self::Barcode(code));
        }

        if let Some(uid) = line.strip_prefix(DEBUG_CARD_PREFIX) {
            return Some(Self::CardUid(uid));
        }

        None
    }

    pub fn payload(&self) -> &'a str {
        match self {
            Self::Barcode(code) => code,
            Self::CardUid(uid) => uid,
        }
    }
}

impl fmt::Display for DebugCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Barcode(code) => write!(f, "{}{}", DEBUG_BARCODE_PREFIX, code),
            Self::CardUid(uid) => write!(f, "{}{}", DEBUG_CARD_PREFIX, uid),
        }
    }
}
