//! Recording audio sink.

use std::sync::{Arc, Mutex};

use crate::traits::AudioSink;

/// A tone request as seen by the speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedTone {
    pub frequency_hz: u16,
    pub duration_ms: u16,
}

#[derive(Debug, Default)]
struct AudioLog {
    tones: Vec<PlayedTone>,
    volume: Option<u8>,
}

/// Audio sink that records tone requests instead of playing them.
#[derive(Debug)]
pub struct RecordingAudio {
    log: Arc<Mutex<AudioLog>>,
}

impl RecordingAudio {
    pub fn new() -> (Self, RecordingAudioHandle) {
        let log = Arc::new(Mutex::new(AudioLog::default()));
        (
            Self {
                log: Arc::clone(&log),
            },
            RecordingAudioHandle { log },
        )
    }
}

impl AudioSink for RecordingAudio {
    fn set_volume(&mut self, volume: u8) {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).volume = Some(volume);
    }

    fn tone(&mut self, frequency_hz: u16, duration_ms: u16) {
        self.log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .tones
            .push(PlayedTone {
                frequency_hz,
                duration_ms,
            });
    }
}

/// Read access to a [`RecordingAudio`] log.
#[derive(Debug, Clone)]
pub struct RecordingAudioHandle {
    log: Arc<Mutex<AudioLog>>,
}

impl RecordingAudioHandle {
    pub fn tones(&self) -> Vec<PlayedTone> {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).tones.clone()
    }

    /// Frequencies only, which is what most assertions care about.
    pub fn frequencies(&self) -> Vec<u16> {
        self.tones().iter().map(|t| t.frequency_hz).collect()
    }

    pub fn volume(&self) -> Option<u8> {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).volume
    }

    pub fn clear(&self) {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).tones.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_tones_and_volume() {
        let (mut audio, handle) = RecordingAudio::new();
        audio.set_volume(32);
        audio.tone(1760, 80);

        assert_eq!(handle.volume(), Some(32));
        assert_eq!(
            handle.tones(),
            vec![PlayedTone {
                frequency_hz: 1760,
                duration_ms: 80
            }]
        );

        handle.clear();
        assert!(handle.frequencies().is_empty());
    }
}
