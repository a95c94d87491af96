//! Peripheral bundle owned by the register.
//!
//! A [`Platform`] names the concrete device types once, so the register and
//! the mode dispatcher take a single type parameter instead of six.

use playreg_hardware::mock::{
    MockByteStream, MockByteStreamHandle, MockCardReader, MockCardReaderHandle, RecordingAudio,
    RecordingAudioHandle, RecordingSurface, RecordingSurfaceHandle,
};
use playreg_hardware::{AudioSink, ByteStream, CardReader, Clock, MockClock, RenderSurface};

/// Concrete device types for one build of the register.
pub trait Platform {
    type DebugStream: ByteStream;
    type BarcodeStream: ByteStream;
    type CardReader: CardReader;
    type Surface: RenderSurface;
    type Audio: AudioSink;
    type Clock: Clock;
}

/// The devices themselves, moved into the register at construction.
pub struct Peripherals<P: Platform> {
    pub debug: P::DebugStream,
    pub barcode: P::BarcodeStream,
    pub card_reader: P::CardReader,
    pub surface: P::Surface,
    pub audio: P::Audio,
    pub clock: P::Clock,
}

/// All-mock platform for tests and demos.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockPlatform;

impl Platform for MockPlatform {
    type DebugStream = MockByteStream;
    type BarcodeStream = MockByteStream;
    type CardReader = MockCardReader;
    type Surface = RecordingSurface;
    type Audio = RecordingAudio;
    type Clock = MockClock;
}

/// Handles for every device of a [`MockPlatform`] register.
#[derive(Debug, Clone)]
pub struct MockHandles {
    pub debug: MockByteStreamHandle,
    pub barcode: MockByteStreamHandle,
    pub card_reader: MockCardReaderHandle,
    pub surface: RecordingSurfaceHandle,
    pub audio: RecordingAudioHandle,
    pub clock: MockClock,
}

impl Peripherals<MockPlatform> {
    /// Mock devices with a card reader that answers on the bus.
    pub fn mock() -> (Self, MockHandles) {
        Self::mock_with_reader(MockCardReader::new())
    }

    /// Mock devices with a card reader that is not detected.
    pub fn mock_without_card_reader() -> (Self, MockHandles) {
        Self::mock_with_reader(MockCardReader::absent())
    }

    fn mock_with_reader(reader: (MockCardReader, MockCardReaderHandle)) -> (Self, MockHandles) {
        let (debug, debug_handle) = MockByteStream::new();
        let (barcode, barcode_handle) = MockByteStream::new();
        let (card_reader, card_reader_handle) = reader;
        let (surface, surface_handle) = RecordingSurface::new();
        let (audio, audio_handle) = RecordingAudio::new();
        let clock = MockClock::new();

        let peripherals = Self {
            debug,
            barcode,
            card_reader,
            surface,
            audio,
            clock: clock.clone(),
        };

        let handles = MockHandles {
            debug: debug_handle,
            barcode: barcode_handle,
            card_reader: card_reader_handle,
            surface: surface_handle,
            audio: audio_handle,
            clock,
        };

        (peripherals, handles)
    }
}
