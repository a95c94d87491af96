//! Peripheral trait definitions.
//!
//! These traits are the contract between the register core and its
//! collaborators: the two byte channels (debug console and barcode scanner),
//! the contactless card reader, the render surface, the speaker and the
//! monotonic clock. The register is driven by a cooperative tick, so every
//! method here returns immediately; none of them await.

use playreg_core::ToneStep;

use crate::error::Result;
use crate::types::{Color, Font, Rect};

/// A byte channel with non-blocking reads.
///
/// The frame reader is generic over this trait, so the same framing logic
/// serves the debug console and the barcode UART.
///
/// # Examples
///
/// ```
/// use playreg_hardware::mock::MockByteStream;
/// use playreg_hardware::traits::ByteStream;
///
/// let (mut stream, handle) = MockByteStream::new();
/// handle.inject(b"AB");
///
/// assert_eq!(stream.bytes_available(), 2);
/// assert_eq!(stream.read_byte(), Some(b'A'));
/// ```
pub trait ByteStream: Send {
    /// Number of bytes that can be read without blocking.
    fn bytes_available(&self) -> usize;

    /// Read the next buffered byte, or `None` when the buffer is empty.
    fn read_byte(&mut self) -> Option<u8>;

    /// Write bytes to the device.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected or the write fails.
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Block until written bytes have left the transmit buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected.
    fn flush(&mut self) -> Result<()>;

    /// Drop every byte currently buffered for reading.
    fn discard_input(&mut self) {
        while self.read_byte().is_some() {}
    }
}

/// Minimum UID length in bytes (per ISO 14443 specification).
pub const MIN_UID_LENGTH: usize = 4;

/// Maximum UID length in bytes (per ISO 14443 specification).
pub const MAX_UID_LENGTH: usize = 10;

/// A card read by the contactless reader.
#[derive(Debug, Clone)]
pub struct CardData {
    /// Card unique identifier (4-10 bytes).
    pub uid: Vec<u8>,

    /// Wall-clock time of the read, for logs.
    pub read_at: chrono::DateTime<chrono::Utc>,
}

impl CardData {
    /// Create card data stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID length is not within 4-10 bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use playreg_hardware::traits::CardData;
    ///
    /// let card = CardData::new(vec![0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
    /// assert_eq!(card.uid_hex(), "DEADBEEF");
    ///
    /// assert!(CardData::new(vec![0x01, 0x02]).is_err());
    /// ```
    pub fn new(uid: Vec<u8>) -> Result<Self> {
        CardDataBuilder::new(uid).build()
    }

    /// Create a builder, e.g. to pin the timestamp in tests.
    pub fn builder(uid: Vec<u8>) -> CardDataBuilder {
        CardDataBuilder::new(uid)
    }

    /// UID as uppercase hexadecimal, two digits per byte.
    pub fn uid_hex(&self) -> String {
        self.uid.iter().map(|b| format!("{:02X}", b)).collect()
    }
}

/// Builder for [`CardData`].
#[derive(Debug, Clone)]
pub struct CardDataBuilder {
    uid: Vec<u8>,
    read_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl CardDataBuilder {
    pub fn new(uid: Vec<u8>) -> Self {
        Self { uid, read_at: None }
    }

    /// Set a custom read timestamp.
    pub fn read_at(mut self, read_at: chrono::DateTime<chrono::Utc>) -> Self {
        self.read_at = Some(read_at);
        self
    }

    /// Build the card data with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID length is not between
    /// [`MIN_UID_LENGTH`] and [`MAX_UID_LENGTH`].
    pub fn build(self) -> Result<CardData> {
        let uid_len = self.uid.len();
        if !(MIN_UID_LENGTH..=MAX_UID_LENGTH).contains(&uid_len) {
            return Err(crate::HardwareError::invalid_data(format!(
                "Card UID length must be between {} and {} bytes, got {}",
                MIN_UID_LENGTH, MAX_UID_LENGTH, uid_len
            )));
        }

        Ok(CardData {
            uid: self.uid,
            read_at: self.read_at.unwrap_or_else(chrono::Utc::now),
        })
    }
}

/// Contactless card reader (MFRC522-class).
///
/// Mirrors the reader's polling API: detect a new card, select it and read
/// its serial, then halt it and stop the crypto session so the next poll
/// does not re-read the same card.
pub trait CardReader: Send {
    /// Check that the reader answers on its bus.
    ///
    /// # Errors
    ///
    /// Returns [`HardwareError::NotAvailable`](crate::HardwareError)
    /// when the reader is not detected.
    fn detect(&mut self) -> Result<()>;

    /// Initialize the reader once it has been detected.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader rejects its configuration.
    fn init(&mut self) -> Result<()>;

    /// Read the chip version register (diagnostics only).
    ///
    /// # Errors
    ///
    /// Returns an error if the register read fails.
    fn version(&mut self) -> Result<u8>;

    /// Whether a card that has not been halted is in the field.
    fn is_new_card_present(&mut self) -> bool;

    /// Select the present card and read its serial.
    ///
    /// Returns `Ok(None)` when the card left the field before selection.
    ///
    /// # Errors
    ///
    /// Returns an error on collisions or malformed UIDs.
    fn read_card_serial(&mut self) -> Result<Option<CardData>>;

    /// Put the selected card into HALT state.
    fn halt(&mut self);

    /// Leave the authenticated crypto session.
    fn stop_crypto(&mut self);
}

/// Drawing surface used by the screen renderer.
///
/// Coordinates are pixels with the origin at the top-left corner. Text is
/// drawn with the current font and colors at a cursor position that marks
/// the top-left of the text box.
pub trait RenderSurface: Send {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    fn fill_screen(&mut self, color: Color);

    fn fill_round_rect(&mut self, rect: Rect, radius: i32, color: Color);

    fn draw_hline(&mut self, x: i32, y: i32, width: i32, color: Color);

    fn set_font(&mut self, font: Font);

    fn set_text_color(&mut self, foreground: Color, background: Color);

    /// Width of `text` in pixels with the current font.
    fn text_width(&self, text: &str) -> i32;

    /// Line height of the current font in pixels.
    fn font_height(&self) -> i32;

    fn draw_text(&mut self, x: i32, y: i32, text: &str);
}

/// Speaker output.
pub trait AudioSink: Send {
    fn set_volume(&mut self, volume: u8);

    /// Start a tone; playback continues in the background for `duration_ms`.
    fn tone(&mut self, frequency_hz: u16, duration_ms: u16);
}

/// Monotonic millisecond clock.
pub trait Clock: Send {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;

    /// Block the caller for `ms` milliseconds.
    fn sleep_ms(&self, ms: u64);
}

/// Play a tone sequence, pausing `wait_ms` after each step that has one.
///
/// # Examples
///
/// ```
/// use playreg_core::PAYMENT_TONE_STEPS;
/// use playreg_hardware::clock::MockClock;
/// use playreg_hardware::mock::RecordingAudio;
/// use playreg_hardware::traits::{Clock, play_tone_steps};
///
/// let clock = MockClock::new();
/// let (mut audio, handle) = RecordingAudio::new();
/// play_tone_steps(&mut audio, &clock, PAYMENT_TONE_STEPS);
///
/// assert_eq!(handle.tones().len(), 3);
/// assert_eq!(clock.now_ms(), 150 + 160);
/// ```
pub fn play_tone_steps<A, C>(audio: &mut A, clock: &C, steps: &[ToneStep])
where
    A: AudioSink + ?Sized,
    C: Clock + ?Sized,
{
    for step in steps {
        audio.tone(step.frequency_hz, step.duration_ms);
        if step.wait_ms > 0 {
            clock.sleep_ms(u64::from(step.wait_ms));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_card_data_uid_hex_pads_bytes() {
        let card = CardData::new(vec![0x04, 0x0A, 0xCD, 0xEF]).unwrap();
        assert_eq!(card.uid_hex(), "040ACDEF");
    }

    #[test]
    fn test_card_data_invalid_uid_length() {
        assert!(CardData::new(vec![0x01, 0x02, 0x03]).is_err());
        assert!(CardData::new(vec![0x01; 11]).is_err());
        assert!(CardData::new(vec![0x01; 4]).is_ok());
        assert!(CardData::new(vec![0x01; 7]).is_ok());
        assert!(CardData::new(vec![0x01; 10]).is_ok());
    }

    #[test]
    fn test_card_data_builder_timestamp() {
        let read_at = chrono::Utc.with_ymd_and_hms(2025, 1, 15, 12, 30, 0).unwrap();
        let card = CardData::builder(vec![0x01, 0x02, 0x03, 0x04])
            .read_at(read_at)
            .build()
            .unwrap();
        assert_eq!(card.read_at, read_at);
    }
}
