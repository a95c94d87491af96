//! Core constants for the play register.
//!
//! These values are the factory defaults of [`RegisterConfig`](crate::RegisterConfig).
//! Timing values are milliseconds on the monotonic device clock.
//!
//! # Usage
//!
//! ```
//! use playreg_core::constants::*;
//!
//! let max_price = PRICE_MIN + (PRICE_LEVELS - 1) * PRICE_STEP;
//! assert_eq!(max_price, 500);
//! ```

// ============================================================================
// Barcode Scanner Link
// ============================================================================

/// Baud rate of the barcode scanner UART.
pub const BARCODE_UART_BAUD: u32 = 115_200;

/// Idle gap after which an unterminated barcode buffer is emitted as a frame.
pub const BARCODE_FRAME_GAP_MS: u64 = 300;

/// Silence window applied after every configuration command.
///
/// Used both as the blocking wait after the write and as the length of the
/// command guard window that follows it.
pub const BARCODE_COMMAND_GUARD_MS: u64 = 120;

/// One-time settle window after initialization before scans are accepted.
pub const BARCODE_BOOT_STABILIZE_MS: u64 = 1500;

/// Scanner command: trigger by the unit button.
pub const BARCODE_CMD_TRIGGER_MODE_BUTTON: [u8; 4] = [0x21, 0x61, 0x41, 0x00];

/// Scanner command: fill light off.
pub const BARCODE_CMD_FILL_LIGHT_OFF: [u8; 4] = [0x21, 0x62, 0x41, 0x00];

/// Scanner command: aim light on.
pub const BARCODE_CMD_AIM_LIGHT_ON: [u8; 4] = [0x21, 0x62, 0x42, 0x02];

/// Exact acknowledgement frame the scanner echoes after a command.
pub const BARCODE_ACK_TOKEN: &str = "3u";

/// Leading markers of short control echoes.
pub const BARCODE_CONTROL_PREFIXES: [char; 2] = ['"', '$'];

/// Frames up to this length that start with a control prefix are echoes.
pub const BARCODE_CONTROL_MAX_LENGTH: usize = 4;

// ============================================================================
// Card Reader
// ============================================================================

/// I2C address of the contactless reader.
pub const RFID_I2C_ADDRESS: u8 = 0x28;

/// I2C bus clock in hertz.
pub const RFID_I2C_CLOCK: u32 = 100_000;

/// The reader board has no reset line; the driver is handed this unused pin.
pub const RFID_RESET_DUMMY_PIN: i32 = 8;

// ============================================================================
// Debug Channel
// ============================================================================

/// Debug input always ends lines with a newline, so the idle path is off.
pub const DEBUG_FRAME_GAP_MS: u64 = 0;

/// Debug line prefix for an injected barcode payload.
pub const DEBUG_BARCODE_PREFIX: &str = "BC:";

/// Debug line prefix for an injected card UID.
pub const DEBUG_CARD_PREFIX: &str = "RFID:";

// ============================================================================
// Session
// ============================================================================

/// How long the payment confirmation stays on screen.
pub const THANK_YOU_DURATION_MS: u64 = 3000;

// ============================================================================
// Register Logic
// ============================================================================

/// Maximum number of items kept in the cart (one per visible row).
pub const ITEM_VISIBLE_ROWS: usize = 3;

/// Lowest price on the ladder.
pub const PRICE_MIN: u32 = 50;

/// Distance between two adjacent prices.
pub const PRICE_STEP: u32 = 10;

/// Number of rungs on the price ladder.
pub const PRICE_LEVELS: u32 = 46;

/// Longest frame buffer kept per stream; older characters are dropped.
pub const FRAME_BUFFER_MAX_LENGTH: usize = 128;

/// Shortest accepted input after trimming.
pub const MIN_VALID_INPUT_LENGTH: usize = 2;

/// Shortest accepted barcode after trimming.
pub const BARCODE_MIN_VALID_LENGTH: usize = 6;

/// Salt appended to a code before hashing it into a name index.
pub const NAME_HASH_SUFFIX: &str = "|NAME|v1";

/// Salt appended to a code before hashing it into a price level.
pub const PRICE_HASH_SUFFIX: &str = "|PRICE|v1";

/// Name used when the candidate list is empty.
pub const FALLBACK_PRODUCT_NAME: &str = "しょうひん";

// ============================================================================
// Audio
// ============================================================================

/// Speaker volume (0-255).
pub const SPEAKER_VOLUME: u8 = 32;
