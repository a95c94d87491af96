//! Barcode scanner configuration commands.
//!
//! The scanner unit accepts four-byte commands on its UART. The register
//! sends [`BOOT_SEQUENCE`] once at initialization.

use std::fmt;

use playreg_core::constants::{
    BARCODE_CMD_AIM_LIGHT_ON, BARCODE_CMD_FILL_LIGHT_OFF, BARCODE_CMD_TRIGGER_MODE_BUTTON,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScannerCommand {
    /// Scan only while the unit's button is held.
    TriggerModeButton,
    FillLightOff,
    AimLightOn,
}

/// Commands sent at boot, in transmission order.
pub const BOOT_SEQUENCE: [ScannerCommand; 3] = [
    ScannerCommand::TriggerModeButton,
    ScannerCommand::FillLightOff,
    ScannerCommand::AimLightOn,
];

impl ScannerCommand {
    /// Wire bytes of the command.
    pub fn bytes(self) -> &'static [u8] {
        match self {
            Self::TriggerModeButton => &BARCODE_CMD_TRIGGER_MODE_BUTTON,
            Self::FillLightOff => &BARCODE_CMD_FILL_LIGHT_OFF,
            Self::AimLightOn => &BARCODE_CMD_AIM_LIGHT_ON,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::TriggerModeButton => "trigger-mode-button",
            Self::FillLightOff => "fill-light-off",
            Self::AimLightOn => "aim-light-on",
        }
    }
}

impl fmt::Display for ScannerCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
