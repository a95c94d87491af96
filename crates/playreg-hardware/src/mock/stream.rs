//! Mock byte stream for testing and development.
//!
//! Bytes injected through the handle become readable by the stream in the
//! order they were sent. Writes are captured so tests can assert on the
//! scanner commands the register transmitted.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::{HardwareError, Result, traits::ByteStream};

/// Mock byte stream backed by an unbounded channel.
///
/// # Examples
///
/// ```
/// use playreg_hardware::mock::MockByteStream;
/// use playreg_hardware::traits::ByteStream;
///
/// let (mut stream, handle) = MockByteStream::new();
///
/// handle.inject_line("BC:ABC123");
/// assert_eq!(stream.bytes_available(), 10);
///
/// stream.write_all(&[0x21, 0x61, 0x41, 0x00]).unwrap();
/// assert_eq!(handle.written(), vec![vec![0x21, 0x61, 0x41, 0x00]]);
/// ```
#[derive(Debug)]
pub struct MockByteStream {
    rx: mpsc::UnboundedReceiver<u8>,

    /// Loopback used to feed the echo back into our own input.
    loopback: mpsc::UnboundedSender<u8>,

    shared: Arc<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    written: Mutex<Vec<Vec<u8>>>,
    echo: Mutex<Option<Vec<u8>>>,
    discards: AtomicUsize,
    flushes: AtomicUsize,
    disconnected: AtomicBool,
}

impl MockByteStream {
    /// Create a new mock stream.
    ///
    /// Returns a tuple of (MockByteStream, MockByteStreamHandle) where the
    /// handle feeds input and inspects output.
    pub fn new() -> (Self, MockByteStreamHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared::default());

        let stream = Self {
            rx,
            loopback: tx.clone(),
            shared: Arc::clone(&shared),
        };

        let handle = MockByteStreamHandle { tx, shared };

        (stream, handle)
    }
}

impl Default for MockByteStream {
    fn default() -> Self {
        Self::new().0
    }
}

impl ByteStream for MockByteStream {
    fn bytes_available(&self) -> usize {
        self.rx.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.try_recv().ok()
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        if self.shared.disconnected.load(Ordering::SeqCst) {
            return Err(HardwareError::disconnected("mock byte stream"));
        }

        lock(&self.shared.written).push(bytes.to_vec());

        if let Some(echo) = lock(&self.shared.echo).as_ref() {
            for &byte in echo {
                // The receiver lives in `self`, so the send cannot fail.
                let _ = self.loopback.send(byte);
            }
        }

        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.shared.disconnected.load(Ordering::SeqCst) {
            return Err(HardwareError::disconnected("mock byte stream"));
        }
        self.shared.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn discard_input(&mut self) {
        while self.rx.try_recv().is_ok() {}
        self.shared.discards.fetch_add(1, Ordering::SeqCst);
    }
}

/// Handle for controlling a mock byte stream.
#[derive(Debug, Clone)]
pub struct MockByteStreamHandle {
    tx: mpsc::UnboundedSender<u8>,
    shared: Arc<Shared>,
}

impl MockByteStreamHandle {
    /// Make `bytes` available for reading.
    pub fn inject(&self, bytes: &[u8]) {
        for &byte in bytes {
            if self.tx.send(byte).is_err() {
                tracing::debug!("mock byte stream dropped, discarding injected input");
                return;
            }
        }
    }

    /// Inject text without a terminator.
    pub fn inject_str(&self, text: &str) {
        self.inject(text.as_bytes());
    }

    /// Inject text followed by `\n`.
    pub fn inject_line(&self, line: &str) {
        self.inject(line.as_bytes());
        self.inject(b"\n");
    }

    /// Every buffer passed to `write_all`, in order.
    pub fn written(&self) -> Vec<Vec<u8>> {
        lock(&self.shared.written).clone()
    }

    /// Number of `discard_input` calls so far.
    pub fn discard_count(&self) -> usize {
        self.shared.discards.load(Ordering::SeqCst)
    }

    /// Number of `flush` calls so far.
    pub fn flush_count(&self) -> usize {
        self.shared.flushes.load(Ordering::SeqCst)
    }

    /// Answer every write with `echo`, like a scanner acknowledging a command.
    pub fn set_echo(&self, echo: Option<&[u8]>) {
        *lock(&self.shared.echo) = echo.map(<[u8]>::to_vec);
    }

    /// Make writes and flushes fail as if the cable was pulled.
    pub fn set_disconnected(&self, disconnected: bool) {
        self.shared.disconnected.store(disconnected, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_in_injection_order() {
        let (mut stream, handle) = MockByteStream::new();
        handle.inject_str("XY");
        handle.inject(b"Z");

        assert_eq!(stream.bytes_available(), 3);
        assert_eq!(stream.read_byte(), Some(b'X'));
        assert_eq!(stream.read_byte(), Some(b'Y'));
        assert_eq!(stream.read_byte(), Some(b'Z'));
        assert_eq!(stream.read_byte(), None);
        assert_eq!(stream.bytes_available(), 0);
    }

    #[test]
    fn test_discard_input_drops_pending_bytes() {
        let (mut stream, handle) = MockByteStream::new();
        handle.inject_line("noise");

        stream.discard_input();
        assert_eq!(stream.bytes_available(), 0);
        assert_eq!(handle.discard_count(), 1);
    }

    #[test]
    fn test_echo_is_readable_after_write() {
        let (mut stream, handle) = MockByteStream::new();
        handle.set_echo(Some(b"3u\r\n"));

        stream.write_all(&[0x21, 0x62, 0x41, 0x00]).unwrap();
        stream.flush().unwrap();

        assert_eq!(stream.bytes_available(), 4);
        assert_eq!(handle.flush_count(), 1);
    }

    #[test]
    fn test_disconnected_write_fails() {
        let (mut stream, handle) = MockByteStream::new();
        handle.set_disconnected(true);

        let result = stream.write_all(b"x");
        assert!(matches!(result, Err(HardwareError::Disconnected { .. })));
        assert!(handle.written().is_empty());
    }
}
