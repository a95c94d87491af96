//! Mock contactless card reader.
//!
//! Cards are "placed in the field" through the handle. A placed card is
//! reported by `is_new_card_present` until it has been read, after which
//! the reader waits for the next placement, like a real reader once the
//! card has been halted.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    HardwareError, Result,
    traits::{CardData, CardReader},
};

/// Default value of the mock version register (MFRC522 v2.0).
pub const MOCK_READER_VERSION: u8 = 0x92;

/// Mock card reader for testing and development.
///
/// # Examples
///
/// ```
/// use playreg_hardware::mock::MockCardReader;
/// use playreg_hardware::traits::CardReader;
///
/// let (mut reader, handle) = MockCardReader::new();
/// reader.detect().unwrap();
///
/// handle.present_card(vec![0xDE, 0xAD, 0xBE, 0xEF]);
/// assert!(reader.is_new_card_present());
///
/// let card = reader.read_card_serial().unwrap().unwrap();
/// assert_eq!(card.uid_hex(), "DEADBEEF");
/// assert!(!reader.is_new_card_present());
/// ```
#[derive(Debug)]
pub struct MockCardReader {
    card_rx: mpsc::UnboundedReceiver<Vec<u8>>,

    /// Card that has been detected but not yet read.
    pending: Option<Vec<u8>>,

    version: u8,

    state: Arc<ReaderState>,
}

#[derive(Debug, Default)]
struct ReaderState {
    absent: AtomicBool,
    initialized: AtomicBool,
    halts: AtomicUsize,
    crypto_stops: AtomicUsize,
}

impl MockCardReader {
    /// Create a reader that answers on the bus.
    pub fn new() -> (Self, MockCardReaderHandle) {
        Self::build(false)
    }

    /// Create a reader whose bus detection fails.
    pub fn absent() -> (Self, MockCardReaderHandle) {
        Self::build(true)
    }

    fn build(absent: bool) -> (Self, MockCardReaderHandle) {
        let (card_tx, card_rx) = mpsc::unbounded_channel();
        let state = Arc::new(ReaderState::default());
        state.absent.store(absent, Ordering::SeqCst);

        let reader = Self {
            card_rx,
            pending: None,
            version: MOCK_READER_VERSION,
            state: Arc::clone(&state),
        };

        (reader, MockCardReaderHandle { card_tx, state })
    }

    /// Override the version register value.
    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }
}

impl CardReader for MockCardReader {
    fn detect(&mut self) -> Result<()> {
        if self.state.absent.load(Ordering::SeqCst) {
            return Err(HardwareError::not_available(
                "card reader",
                "no answer on the bus",
            ));
        }
        Ok(())
    }

    fn init(&mut self) -> Result<()> {
        self.detect()?;
        self.state.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn version(&mut self) -> Result<u8> {
        self.detect()?;
        Ok(self.version)
    }

    fn is_new_card_present(&mut self) -> bool {
        if self.pending.is_none() {
            self.pending = self.card_rx.try_recv().ok();
        }
        self.pending.is_some()
    }

    fn read_card_serial(&mut self) -> Result<Option<CardData>> {
        match self.pending.take() {
            Some(uid) => CardData::new(uid).map(Some),
            None => Ok(None),
        }
    }

    fn halt(&mut self) {
        self.state.halts.fetch_add(1, Ordering::SeqCst);
    }

    fn stop_crypto(&mut self) {
        self.state.crypto_stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Handle for controlling a mock card reader.
#[derive(Debug, Clone)]
pub struct MockCardReaderHandle {
    card_tx: mpsc::UnboundedSender<Vec<u8>>,
    state: Arc<ReaderState>,
}

impl MockCardReaderHandle {
    /// Place a card with the given UID in the field.
    pub fn present_card(&self, uid: Vec<u8>) {
        if self.card_tx.send(uid).is_err() {
            tracing::debug!("mock card reader dropped, card not presented");
        }
    }

    /// Whether `init` has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.state.initialized.load(Ordering::SeqCst)
    }

    pub fn halt_count(&self) -> usize {
        self.state.halts.load(Ordering::SeqCst)
    }

    pub fn stop_crypto_count(&self) -> usize {
        self.state.crypto_stops.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_reader_is_not_detected() {
        let (mut reader, handle) = MockCardReader::absent();
        assert!(matches!(
            reader.detect(),
            Err(HardwareError::NotAvailable { .. })
        ));
        assert!(reader.init().is_err());
        assert!(!handle.is_initialized());
    }

    #[test]
    fn test_version_register() {
        let (reader, _handle) = MockCardReader::new();
        let mut reader = reader.with_version(0x18);
        assert_eq!(reader.version().unwrap(), 0x18);
    }

    #[test]
    fn test_short_uid_is_read_error() {
        let (mut reader, handle) = MockCardReader::new();
        handle.present_card(vec![0x01, 0x02]);

        assert!(reader.is_new_card_present());
        assert!(reader.read_card_serial().is_err());
        // The malformed card is consumed, not retried forever.
        assert!(!reader.is_new_card_present());
    }

    #[test]
    fn test_read_without_presence_returns_none() {
        let (mut reader, _handle) = MockCardReader::new();
        assert!(reader.read_card_serial().unwrap().is_none());
    }

    #[test]
    fn test_halt_and_stop_crypto_counted() {
        let (mut reader, handle) = MockCardReader::new();
        reader.halt();
        reader.stop_crypto();
        reader.stop_crypto();
        assert_eq!(handle.halt_count(), 1);
        assert_eq!(handle.stop_crypto_count(), 2);
    }
}
