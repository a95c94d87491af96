//! Frame reader for line-oriented byte streams.
//!
//! Turns bytes from a [`ByteStream`] into text frames. A frame ends at a
//! carriage return or line feed, or, for devices that never send a
//! terminator, after the stream has been idle for `idle_timeout_ms`.
//!
//! # Framing rules
//!
//! ```text
//! byte            action
//! ----            ------
//! \r or \n        emit buffer as a frame (skipped when the buffer is empty)
//! 0x20..=0x7E     append, then keep only the newest `max_length` bytes
//! anything else   drop
//! stream empty    emit buffer if idle for >= idle_timeout_ms (0 disables)
//! ```
//!
//! `\r\n` pairs therefore yield a single frame, and a lone `\r\n` yields none.
//!
//! # Usage
//!
//! ```
//! use playreg_hardware::mock::MockByteStream;
//! use playreg_protocol::FrameReader;
//!
//! let (mut stream, handle) = MockByteStream::new();
//! let mut reader = FrameReader::new(300, 128);
//!
//! handle.inject(b"4901234567894\r\n");
//! assert_eq!(reader.read_frame(&mut stream, 0).as_deref(), Some("4901234567894"));
//! assert_eq!(reader.read_frame(&mut stream, 0), None);
//! ```

use playreg_hardware::ByteStream;

/// Stateful frame assembler for one input stream.
#[derive(Debug, Clone)]
pub struct FrameReader {
    /// Bytes of the frame in progress. Always printable ASCII.
    buffer: String,

    /// Time the most recent byte was read; 0 after a flush.
    last_byte_at_ms: u64,

    /// Idle period that completes an unterminated frame; 0 disables it.
    idle_timeout_ms: u64,

    /// Buffer cap. Older bytes are dropped from the front beyond this.
    max_length: usize,
}

impl FrameReader {
    /// Create a reader.
    ///
    /// A `max_length` of 0 is treated as 1 so the newest byte always survives.
    pub fn new(idle_timeout_ms: u64, max_length: usize) -> Self {
        let max_length = max_length.max(1);
        Self {
            buffer: String::with_capacity(max_length),
            last_byte_at_ms: 0,
            idle_timeout_ms,
            max_length,
        }
    }

    /// Read at most one frame from `stream`.
    ///
    /// Consumes bytes up to and including the first terminator that
    /// completes a frame; bytes after it stay in the stream for the next
    /// call. Call in a loop until it returns `None` to drain every frame
    /// available this tick.
    pub fn read_frame<S>(&mut self, stream: &mut S, now_ms: u64) -> Option<String>
    where
        S: ByteStream + ?Sized,
    {
        while stream.bytes_available() > 0 {
            let Some(byte) = stream.read_byte() else {
                break;
            };
            self.last_byte_at_ms = now_ms;

            if byte == b'\r' || byte == b'\n' {
                if self.buffer.is_empty() {
                    continue;
                }
                return Some(self.take());
            }

            if (0x20..=0x7E).contains(&byte) {
                self.buffer.push(char::from(byte));
            }

            self.trim();
        }

        if self.is_idle(now_ms) {
            tracing::trace!(frame = %self.buffer, "Frame completed by idle timeout");
            return Some(self.take());
        }

        None
    }

    /// Drop the partial frame and forget the last byte time.
    pub fn flush(&mut self) {
        self.buffer.clear();
        self.last_byte_at_ms = 0;
    }

    /// The frame in progress.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    pub fn last_byte_at_ms(&self) -> u64 {
        self.last_byte_at_ms
    }

    pub fn idle_timeout_ms(&self) -> u64 {
        self.idle_timeout_ms
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn is_idle(&self, now_ms: u64) -> bool {
        self.idle_timeout_ms > 0
            && !self.buffer.is_empty()
            && now_ms.saturating_sub(self.last_byte_at_ms) >= self.idle_timeout_ms
    }

    fn take(&mut self) -> String {
        std::mem::replace(&mut self.buffer, String::with_capacity(self.max_length))
    }

    fn trim(&mut self) {
        if self.buffer.len() > self.max_length {
            // ASCII only, so every byte offset is a char boundary.
            let excess = self.buffer.len() - self.max_length;
            self.buffer.drain(..excess);
        }
    }
}
